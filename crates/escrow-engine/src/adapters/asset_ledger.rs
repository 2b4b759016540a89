//! # In-Memory Asset Ledger
//!
//! Implements the `AssetLedger` port over a balance map.
//!
//! Intended for testing and single-process deployments; a production
//! binding would adapt a real ledger behind the same trait.

use crate::domain::value_objects::{AccountId, Asset, Currency};
use crate::ports::outbound::{AssetLedger, TransferError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// In-memory ledger with per-currency balances.
#[derive(Debug, Default)]
pub struct InMemoryAssetLedger {
    accounts: RwLock<HashSet<AccountId>>,
    balances: RwLock<HashMap<(AccountId, Currency), i64>>,
    /// When set, every transfer fails. For rollback tests.
    fail_transfers: RwLock<bool>,
}

impl InMemoryAssetLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an account with no balances.
    pub fn register(&self, account: AccountId) {
        self.accounts.write().insert(account);
    }

    /// Credit an account directly. Registers the account if needed.
    pub fn credit(&self, account: &AccountId, asset: &Asset) {
        self.register(account.clone());
        *self
            .balances
            .write()
            .entry((account.clone(), asset.currency.clone()))
            .or_insert(0) += asset.amount;
    }

    /// Current balance of `account` in `currency`.
    pub fn balance_of(&self, account: &AccountId, currency: &Currency) -> i64 {
        self.balances
            .read()
            .get(&(account.clone(), currency.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Toggle injected transfer failure.
    pub fn set_fail_transfers(&self, fail: bool) {
        *self.fail_transfers.write() = fail;
    }
}

#[async_trait]
impl AssetLedger for InMemoryAssetLedger {
    async fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: &Asset,
        memo: &str,
    ) -> Result<(), TransferError> {
        if *self.fail_transfers.read() {
            return Err(TransferError::Rejected("injected failure".to_string()));
        }

        {
            let accounts = self.accounts.read();
            for account in [from, to] {
                if !accounts.contains(account) {
                    return Err(TransferError::UnknownAccount(account.clone()));
                }
            }
        }

        let mut balances = self.balances.write();
        let held = balances
            .get(&(from.clone(), amount.currency.clone()))
            .copied()
            .unwrap_or(0);
        if held < amount.amount {
            return Err(TransferError::InsufficientFunds {
                account: from.clone(),
                held,
                needed: amount.amount,
            });
        }

        *balances
            .entry((from.clone(), amount.currency.clone()))
            .or_insert(0) -= amount.amount;
        *balances
            .entry((to.clone(), amount.currency.clone()))
            .or_insert(0) += amount.amount;

        debug!("[escrow] transfer {} -> {}: {} ({})", from, to, amount, memo);
        Ok(())
    }
}
