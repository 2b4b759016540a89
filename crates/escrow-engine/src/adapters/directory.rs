//! # In-Memory Account Directory
//!
//! Implements the `AccountDirectory` port over a registered-account set.

use crate::domain::value_objects::AccountId;
use crate::ports::outbound::AccountDirectory;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Directory of known accounts.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<HashSet<AccountId>>,
}

impl InMemoryAccountDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    pub fn register(&self, account: AccountId) {
        self.accounts.write().insert(account);
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn exists(&self, account: &AccountId) -> bool {
        self.accounts.read().contains(account)
    }
}
