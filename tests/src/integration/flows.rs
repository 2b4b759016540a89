//! # Lifecycle Flows
//!
//! Full create/claim/refund/cleanup choreography against in-memory
//! collaborators, including one pass driven through a `dyn EscrowApi`
//! binding.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use escrow_engine::adapters::{
        InMemoryAccountDirectory, InMemoryAssetLedger, ManualClock, PermissiveAuth,
    };
    use escrow_engine::{
        generate_random_secret, hashlock_for, AccountId, Asset, Collaborators, CreateEscrow,
        Currency, EscrowApi, EscrowConfig, EscrowError, EscrowService, EscrowStatus, ExternalRef,
        SecretBytes,
    };

    const T0: u64 = 1_700_000_000;
    const HOUR: u64 = 3600;
    const DAY: u64 = 86_400;

    fn eos(amount: i64) -> Asset {
        Asset::new(amount, "EOS", "eosio.token")
    }

    fn eos_currency() -> Currency {
        eos(1).currency
    }

    struct World {
        service: EscrowService,
        ledger: Arc<InMemoryAssetLedger>,
        clock: Arc<ManualClock>,
        operator: AccountId,
    }

    fn world() -> World {
        let config = EscrowConfig::default();
        let operator = config.operator.clone();
        let ledger = Arc::new(InMemoryAssetLedger::new());
        let directory = Arc::new(InMemoryAccountDirectory::new());
        let clock = Arc::new(ManualClock::new(T0));

        for name in ["alice", "bob", "carol", "dave"] {
            directory.register(AccountId::from(name));
            ledger.register(AccountId::from(name));
        }
        directory.register(config.escrow_account.clone());
        ledger.register(config.escrow_account.clone());
        ledger.credit(&AccountId::from("alice"), &eos(10_000));
        ledger.credit(&AccountId::from("carol"), &eos(10_000));

        let service = EscrowService::new(
            config,
            Collaborators {
                ledger: ledger.clone(),
                directory,
                clock: clock.clone(),
                auth: Arc::new(PermissiveAuth),
            },
        );
        World {
            service,
            ledger,
            clock,
            operator,
        }
    }

    fn request(sender: &str, recipient: &str, amount: i64, secret: &SecretBytes) -> CreateEscrow {
        CreateEscrow {
            sender: AccountId::from(sender),
            recipient: AccountId::from(recipient),
            amount: eos(amount),
            hashlock: hashlock_for(secret),
            timelock_secs: HOUR,
            memo: "cross-chain swap leg".to_string(),
            external_ref: ExternalRef {
                tx_hash: "0xabc123".to_string(),
                asset: "0xUSDC".to_string(),
                amount: "100.00".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_create_then_claim_pays_recipient() {
        let w = world();
        let secret = generate_random_secret();
        let id = w
            .service
            .create_escrow(request("alice", "bob", 100, &secret))
            .await
            .unwrap();

        w.service
            .claim(id, secret, AccountId::from("bob"))
            .await
            .unwrap();

        let record = w.service.get(id).unwrap();
        assert_eq!(record.status, EscrowStatus::Claimed);
        assert_eq!(record.external_ref.tx_hash, "0xabc123");
        assert_eq!(
            w.ledger.balance_of(&AccountId::from("bob"), &eos_currency()),
            100
        );
        assert_eq!(
            w.ledger.balance_of(&AccountId::from("alice"), &eos_currency()),
            9_900
        );
    }

    #[tokio::test]
    async fn test_wrong_secret_keeps_escrow_open() {
        let w = world();
        let secret = generate_random_secret();
        let id = w
            .service
            .create_escrow(request("alice", "bob", 100, &secret))
            .await
            .unwrap();

        let wrong = generate_random_secret();
        let result = w.service.claim(id, wrong, AccountId::from("bob")).await;
        assert!(matches!(result, Err(EscrowError::HashMismatch(_))));

        assert_eq!(w.service.get(id).unwrap().status, EscrowStatus::Open);
        assert_eq!(
            w.ledger.balance_of(&AccountId::from("bob"), &eos_currency()),
            0
        );
    }

    #[tokio::test]
    async fn test_short_timelock_rejected_without_side_effects() {
        let w = world();
        let secret = generate_random_secret();
        let mut req = request("alice", "bob", 100, &secret);
        req.timelock_secs = 60;

        let result = w.service.create_escrow(req).await;
        assert!(matches!(
            result,
            Err(EscrowError::TimelockOutOfBounds { requested: 60, .. })
        ));
        assert_eq!(w.service.stats().total, 0);
        assert_eq!(
            w.ledger.balance_of(&AccountId::from("alice"), &eos_currency()),
            10_000
        );

        // id sequence unaffected by the failed attempt
        let id = w
            .service
            .create_escrow(request("alice", "bob", 100, &secret))
            .await
            .unwrap();
        assert_eq!(id, 0);
    }

    #[tokio::test]
    async fn test_refund_after_expiry_then_claim_is_state_error() {
        let w = world();
        let secret = generate_random_secret();
        let id = w
            .service
            .create_escrow(request("alice", "bob", 250, &secret))
            .await
            .unwrap();

        // not expired yet
        assert!(matches!(
            w.service.refund(id, AccountId::from("alice")).await,
            Err(EscrowError::NotYetExpired { .. })
        ));

        w.clock.advance(HOUR);
        w.service.refund(id, AccountId::from("alice")).await.unwrap();
        assert_eq!(w.service.get(id).unwrap().status, EscrowStatus::Refunded);
        assert_eq!(
            w.ledger.balance_of(&AccountId::from("alice"), &eos_currency()),
            10_000
        );

        // late claim by the recipient hits the state machine, not expiry
        assert!(matches!(
            w.service.claim(id, secret, AccountId::from("bob")).await,
            Err(EscrowError::NotOpen {
                status: EscrowStatus::Refunded,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_double_claim_same_secret() {
        let w = world();
        let secret = generate_random_secret();
        let id = w
            .service
            .create_escrow(request("alice", "bob", 100, &secret))
            .await
            .unwrap();

        w.service
            .claim(id, secret.clone(), AccountId::from("bob"))
            .await
            .unwrap();
        assert!(matches!(
            w.service.claim(id, secret, AccountId::from("bob")).await,
            Err(EscrowError::NotOpen {
                status: EscrowStatus::Claimed,
                ..
            })
        ));
        // paid exactly once
        assert_eq!(
            w.ledger.balance_of(&AccountId::from("bob"), &eos_currency()),
            100
        );
    }

    #[tokio::test]
    async fn test_shared_hashlock_second_claim_is_replay() {
        let w = world();
        let secret = generate_random_secret();

        // two escrows committed to the same secret, different senders
        let first = w
            .service
            .create_escrow(request("alice", "bob", 100, &secret))
            .await
            .unwrap();
        let second = w
            .service
            .create_escrow(request("carol", "dave", 300, &secret))
            .await
            .unwrap();

        w.service
            .claim(first, secret.clone(), AccountId::from("bob"))
            .await
            .unwrap();

        // the digest is consumed system-wide even though the hash matches
        let result = w
            .service
            .claim(second, secret, AccountId::from("dave"))
            .await;
        assert!(matches!(result, Err(EscrowError::SecretConsumed(_))));
        assert_eq!(w.service.get(second).unwrap().status, EscrowStatus::Open);

        // the second escrow can still exit via refund
        w.clock.advance(HOUR);
        w.service
            .refund(second, AccountId::from("carol"))
            .await
            .unwrap();
        assert_eq!(
            w.ledger.balance_of(&AccountId::from("carol"), &eos_currency()),
            10_000
        );
    }

    #[tokio::test]
    async fn test_stats_follow_the_lifecycle() {
        let w = world();
        let s1 = generate_random_secret();
        let s2 = generate_random_secret();
        let s3 = generate_random_secret();

        let a = w
            .service
            .create_escrow(request("alice", "bob", 100, &s1))
            .await
            .unwrap();
        let b = w
            .service
            .create_escrow(request("alice", "bob", 200, &s2))
            .await
            .unwrap();
        w.service
            .create_escrow(request("carol", "dave", 400, &s3))
            .await
            .unwrap();

        let stats = w.service.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.open, 3);
        assert_eq!(stats.locked_value.get(&eos_currency()), Some(&700));

        w.service.claim(a, s1, AccountId::from("bob")).await.unwrap();
        w.clock.advance(HOUR);
        w.service.refund(b, AccountId::from("alice")).await.unwrap();

        let stats = w.service.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.claimed, 1);
        assert_eq!(stats.refunded, 1);
        assert_eq!(stats.locked_value.get(&eos_currency()), Some(&400));
    }

    #[tokio::test]
    async fn test_cleanup_sweeps_only_old_finalized_records() {
        let w = world();
        let s1 = generate_random_secret();
        let s2 = generate_random_secret();
        let s3 = generate_random_secret();

        let claimed = w
            .service
            .create_escrow(request("alice", "bob", 100, &s1))
            .await
            .unwrap();
        let refunded = w
            .service
            .create_escrow(request("alice", "bob", 200, &s2))
            .await
            .unwrap();
        let stays_open = w
            .service
            .create_escrow(request("carol", "dave", 300, &s3))
            .await
            .unwrap();

        w.service
            .claim(claimed, s1, AccountId::from("bob"))
            .await
            .unwrap();
        w.clock.advance(HOUR);
        w.service
            .refund(refunded, AccountId::from("alice"))
            .await
            .unwrap();

        // non-operator callers are refused
        assert!(matches!(
            w.service.cleanup(&AccountId::from("alice"), 10),
            Err(EscrowError::Unauthorized {
                action: "cleanup",
                ..
            })
        ));

        // within the retention window nothing is deleted
        assert_eq!(w.service.cleanup(&w.operator, 10).unwrap(), 0);

        w.clock.advance(DAY + 1);
        assert_eq!(w.service.cleanup(&w.operator, 10).unwrap(), 2);

        assert!(matches!(
            w.service.get(claimed),
            Err(EscrowError::NotFound(_))
        ));
        assert!(matches!(
            w.service.get(refunded),
            Err(EscrowError::NotFound(_))
        ));
        // open records survive, even long past expiry
        assert_eq!(
            w.service.get(stays_open).unwrap().status,
            EscrowStatus::Open
        );
    }

    #[tokio::test]
    async fn test_distinct_records_claim_concurrently() {
        let w = world();
        let s1 = generate_random_secret();
        let s2 = generate_random_secret();

        let a = w
            .service
            .create_escrow(request("alice", "bob", 100, &s1))
            .await
            .unwrap();
        let b = w
            .service
            .create_escrow(request("carol", "dave", 200, &s2))
            .await
            .unwrap();

        let (ra, rb) = tokio::join!(
            w.service.claim(a, s1, AccountId::from("bob")),
            w.service.claim(b, s2, AccountId::from("dave")),
        );
        ra.unwrap();
        rb.unwrap();

        assert_eq!(
            w.ledger.balance_of(&AccountId::from("bob"), &eos_currency()),
            100
        );
        assert_eq!(
            w.ledger.balance_of(&AccountId::from("dave"), &eos_currency()),
            200
        );
    }

    #[tokio::test]
    async fn test_ledger_failure_leaves_no_trace() {
        let w = world();
        let secret = generate_random_secret();
        let id = w
            .service
            .create_escrow(request("alice", "bob", 100, &secret))
            .await
            .unwrap();
        let before = w.service.stats();

        w.ledger.set_fail_transfers(true);
        assert!(matches!(
            w.service
                .claim(id, secret.clone(), AccountId::from("bob"))
                .await,
            Err(EscrowError::Transfer(_))
        ));

        // record, stats, and replay ledger are exactly as before
        assert_eq!(w.service.get(id).unwrap().status, EscrowStatus::Open);
        assert_eq!(w.service.stats(), before);

        w.ledger.set_fail_transfers(false);
        w.service
            .claim(id, secret, AccountId::from("bob"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_trait_object_binding_runs_full_flow() {
        let w = world();
        let api: &dyn EscrowApi = &w.service;

        let secret = generate_random_secret();
        let id = api
            .create_escrow(request("alice", "bob", 100, &secret))
            .await
            .unwrap();
        api.claim(id, secret, AccountId::from("bob")).await.unwrap();

        assert_eq!(api.get(id).unwrap().status, EscrowStatus::Claimed);
        assert_eq!(api.escrows_of(&AccountId::from("alice")).len(), 1);
        assert_eq!(api.stats().claimed, 1);
        // nothing is past retention yet
        assert_eq!(api.cleanup(&w.operator, 10).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_escrows_of_lists_only_that_sender() {
        let w = world();
        let s1 = generate_random_secret();
        let s2 = generate_random_secret();
        w.service
            .create_escrow(request("alice", "bob", 100, &s1))
            .await
            .unwrap();
        w.service
            .create_escrow(request("carol", "dave", 200, &s2))
            .await
            .unwrap();

        let alice = w.service.escrows_of(&AccountId::from("alice"));
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].sender, AccountId::from("alice"));
        assert!(w.service.escrows_of(&AccountId::from("bob")).is_empty());
    }
}
