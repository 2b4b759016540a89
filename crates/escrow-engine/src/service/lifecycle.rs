//! # Escrow Lifecycle Service
//!
//! Validates and executes create/claim/refund against the record store
//! and the preimage ledger, invoking the asset ledger for fund
//! movement.
//!
//! ## Atomicity
//!
//! State mutation and fund movement form a single unit: every check
//! runs first, the ledger transfer runs next, and record mutations
//! commit only after the transfer returns success. The one mutation
//! ahead of the transfer is the digest reservation in the preimage
//! ledger, which closes the replay window between escrows sharing a
//! hashlock; a failed transfer releases it. A failed invocation
//! therefore leaves no observable state change. A per-record lock is
//! held across the transfer await point, so no concurrent call can
//! interleave between check and commit on the same record.

use crate::algorithms::secret::hashlock_for;
use crate::domain::{
    invariant_authorized_claimer, invariant_authorized_refunder, invariant_memo_bounds,
    invariant_secret_matches, invariant_timelock_bounds, invariant_valid_amount, AccountId,
    CreateEscrow, EscrowConfig, EscrowError, EscrowId, EscrowRecord, EscrowStatus, SecretBytes,
};
use crate::ports::outbound::{AccountDirectory, AssetLedger, CallerAuth, Clock};
use crate::service::reaper::ExpiryReaper;
use crate::service::stats::{StatsReporter, StatsSnapshot};
use crate::store::{EscrowStore, PreimageLedger};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Lock table serializing lifecycle calls per record.
///
/// The async mutex is held across the ledger await point; the
/// `parking_lot` guard on the table itself never is.
#[derive(Default)]
pub(crate) struct RecordLocks {
    table: Mutex<HashMap<EscrowId, Arc<tokio::sync::Mutex<()>>>>,
}

impl RecordLocks {
    pub(crate) fn handle(&self, id: EscrowId) -> Arc<tokio::sync::Mutex<()>> {
        self.table.lock().entry(id).or_default().clone()
    }

    /// Drop lock entries for deleted records.
    pub(crate) fn prune(&self, ids: &[EscrowId]) {
        let mut table = self.table.lock();
        for id in ids {
            table.remove(id);
        }
    }
}

/// External collaborators of the lifecycle service.
#[derive(Clone)]
pub struct Collaborators {
    /// Moves value between accounts.
    pub ledger: Arc<dyn AssetLedger>,
    /// Account existence checks.
    pub directory: Arc<dyn AccountDirectory>,
    /// Trusted wall clock.
    pub clock: Arc<dyn Clock>,
    /// Caller identity verification.
    pub auth: Arc<dyn CallerAuth>,
}

/// The escrow lifecycle engine.
pub struct EscrowService {
    config: EscrowConfig,
    store: Arc<RwLock<EscrowStore>>,
    preimages: Arc<RwLock<PreimageLedger>>,
    locks: Arc<RecordLocks>,
    ledger: Arc<dyn AssetLedger>,
    directory: Arc<dyn AccountDirectory>,
    clock: Arc<dyn Clock>,
    auth: Arc<dyn CallerAuth>,
}

impl EscrowService {
    /// Create a service over empty stores.
    pub fn new(config: EscrowConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            store: Arc::new(RwLock::new(EscrowStore::new())),
            preimages: Arc::new(RwLock::new(PreimageLedger::new())),
            locks: Arc::new(RecordLocks::default()),
            ledger: collaborators.ledger,
            directory: collaborators.directory,
            clock: collaborators.clock,
            auth: collaborators.auth,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EscrowConfig {
        &self.config
    }

    /// Build a reaper sharing this service's store.
    pub fn reaper(&self) -> ExpiryReaper {
        ExpiryReaper::new(
            self.config.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.locks),
            Arc::clone(&self.clock),
        )
    }

    /// Build a stats reporter sharing this service's store.
    pub fn reporter(&self) -> StatsReporter {
        StatsReporter::new(Arc::clone(&self.store))
    }

    /// Validate and create a new escrow. Returns the new id.
    ///
    /// The deposit transfer and the record insertion form one unit: the
    /// id is allocated only after the transfer succeeds, so a failed
    /// creation leaves the id sequence untouched.
    pub async fn create_escrow(&self, request: CreateEscrow) -> Result<EscrowId, EscrowError> {
        if !self.auth.is_authentic(&request.sender) {
            return Err(EscrowError::Unauthenticated(request.sender));
        }
        if !self.directory.exists(&request.recipient) {
            return Err(EscrowError::UnknownAccount(request.recipient));
        }
        invariant_valid_amount(&request)?;
        invariant_timelock_bounds(request.timelock_secs, &self.config)?;
        invariant_memo_bounds(&request.memo, &self.config)?;

        let now = self.clock.now();
        let expiry = now.saturating_add(request.timelock_secs);
        let hashlock = request.hashlock;

        let memo = format!("HTLC deposit from {}", request.sender);
        self.ledger
            .transfer(
                &request.sender,
                &self.config.escrow_account,
                &request.amount,
                &memo,
            )
            .await?;

        let id = {
            let mut store = self.store.write();
            let record = EscrowRecord {
                id: store.available_id(),
                sender: request.sender,
                recipient: request.recipient,
                amount: request.amount,
                hashlock: request.hashlock,
                expiry,
                status: EscrowStatus::Open,
                memo: request.memo,
                external_ref: request.external_ref,
                created_at: now,
            };
            store.insert(record)
        };

        info!(
            "[escrow] created escrow {} (hashlock {}.., expiry {})",
            id,
            hex::encode(&hashlock[..4]),
            expiry
        );
        Ok(id)
    }

    /// Claim an open, unexpired escrow by revealing its secret.
    pub async fn claim(
        &self,
        id: EscrowId,
        secret: SecretBytes,
        claimer: AccountId,
    ) -> Result<(), EscrowError> {
        if !self.auth.is_authentic(&claimer) {
            return Err(EscrowError::Unauthenticated(claimer));
        }
        debug!("[escrow] claim attempt on escrow {} by {}", id, claimer);

        let lock = self.locks.handle(id);
        let _guard = lock.lock().await;
        // one clock reading per invocation
        let now = self.clock.now();

        let record = self
            .store
            .read()
            .get(id)
            .cloned()
            .ok_or(EscrowError::NotFound(id))?;
        if record.status.is_terminal() {
            return Err(EscrowError::NotOpen {
                id,
                status: record.status,
            });
        }
        if record.is_expired(now) {
            return Err(EscrowError::Expired {
                id,
                expiry: record.expiry,
                now,
            });
        }
        invariant_authorized_claimer(&record, &claimer)?;
        let digest = hashlock_for(&secret);
        invariant_secret_matches(&digest, &record)?;
        // Reserve the digest before the transfer. Claims on distinct
        // records run under distinct locks, so a read-only replay
        // check here would let two escrows sharing a hashlock both
        // pass and both commit after the await. Reservation makes the
        // check and its commit one atomic step; a failed transfer
        // releases it below.
        if !self.preimages.write().reserve(digest) {
            return Err(EscrowError::SecretConsumed(digest));
        }

        let memo = format!("HTLC claim for escrow {id}");
        if let Err(err) = self
            .ledger
            .transfer(
                &self.config.escrow_account,
                &record.recipient,
                &record.amount,
                &memo,
            )
            .await
        {
            // Failed claims must not burn the digest.
            self.preimages.write().release(&digest);
            return Err(err.into());
        }

        {
            let mut store = self.store.write();
            let updated = store.set_status(id, EscrowStatus::Claimed);
            debug_assert!(updated, "claimed record vanished mid-call");
        }

        info!(
            "[escrow] escrow {} claimed by {} (digest {}..)",
            id,
            claimer,
            hex::encode(&digest[..4])
        );
        Ok(())
    }

    /// Refund an open, expired escrow back to its sender.
    pub async fn refund(&self, id: EscrowId, refunder: AccountId) -> Result<(), EscrowError> {
        if !self.auth.is_authentic(&refunder) {
            return Err(EscrowError::Unauthenticated(refunder));
        }
        debug!("[escrow] refund attempt on escrow {} by {}", id, refunder);

        let lock = self.locks.handle(id);
        let _guard = lock.lock().await;
        let now = self.clock.now();

        let record = self
            .store
            .read()
            .get(id)
            .cloned()
            .ok_or(EscrowError::NotFound(id))?;
        if record.status.is_terminal() {
            return Err(EscrowError::NotOpen {
                id,
                status: record.status,
            });
        }
        if !record.is_expired(now) {
            return Err(EscrowError::NotYetExpired {
                id,
                expiry: record.expiry,
                now,
            });
        }
        invariant_authorized_refunder(&record, &refunder)?;

        let memo = format!("HTLC refund for escrow {id}");
        self.ledger
            .transfer(
                &self.config.escrow_account,
                &record.sender,
                &record.amount,
                &memo,
            )
            .await?;

        {
            let mut store = self.store.write();
            let updated = store.set_status(id, EscrowStatus::Refunded);
            debug_assert!(updated, "refunded record vanished mid-call");
        }

        info!("[escrow] escrow {} refunded to {}", id, refunder);
        Ok(())
    }

    /// Pure read of one record.
    pub fn get(&self, id: EscrowId) -> Result<EscrowRecord, EscrowError> {
        self.store
            .read()
            .get(id)
            .cloned()
            .ok_or(EscrowError::NotFound(id))
    }

    /// Records created by `sender`.
    pub fn escrows_of(&self, sender: &AccountId) -> Vec<EscrowRecord> {
        self.store
            .read()
            .by_sender(sender)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Delegated maintenance sweep (see [`ExpiryReaper`]).
    pub fn cleanup(&self, caller: &AccountId, max_records: u64) -> Result<u64, EscrowError> {
        self.reaper().cleanup(caller, max_records)
    }

    /// Delegated aggregation (see [`StatsReporter`]).
    pub fn stats(&self) -> StatsSnapshot {
        self.reporter().get_stats()
    }
}

#[async_trait::async_trait]
impl crate::ports::inbound::EscrowApi for EscrowService {
    async fn create_escrow(&self, request: CreateEscrow) -> Result<EscrowId, EscrowError> {
        EscrowService::create_escrow(self, request).await
    }

    async fn claim(
        &self,
        id: EscrowId,
        secret: SecretBytes,
        claimer: AccountId,
    ) -> Result<(), EscrowError> {
        EscrowService::claim(self, id, secret, claimer).await
    }

    async fn refund(&self, id: EscrowId, refunder: AccountId) -> Result<(), EscrowError> {
        EscrowService::refund(self, id, refunder).await
    }

    fn get(&self, id: EscrowId) -> Result<EscrowRecord, EscrowError> {
        EscrowService::get(self, id)
    }

    fn escrows_of(&self, sender: &AccountId) -> Vec<EscrowRecord> {
        EscrowService::escrows_of(self, sender)
    }

    fn cleanup(&self, caller: &AccountId, max_records: u64) -> Result<u64, EscrowError> {
        EscrowService::cleanup(self, caller, max_records)
    }

    fn stats(&self) -> StatsSnapshot {
        EscrowService::stats(self)
    }
}
