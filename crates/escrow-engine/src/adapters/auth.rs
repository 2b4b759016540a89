//! # Authenticator Adapters
//!
//! Caller authentication happens outside the engine (signatures,
//! sessions, whatever the binding uses); these adapters stand in for
//! that layer.

use crate::domain::value_objects::AccountId;
use crate::ports::outbound::CallerAuth;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Accepts every caller. For tests and trusted in-process use.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissiveAuth;

impl CallerAuth for PermissiveAuth {
    fn is_authentic(&self, _account: &AccountId) -> bool {
        true
    }
}

/// Accepts only explicitly allowed identities.
#[derive(Debug, Default)]
pub struct AllowListAuth {
    allowed: RwLock<HashSet<AccountId>>,
}

impl AllowListAuth {
    /// Create an empty allow list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `account` to act for itself.
    pub fn allow(&self, account: AccountId) {
        self.allowed.write().insert(account);
    }

    /// Revoke `account`.
    pub fn revoke(&self, account: &AccountId) {
        self.allowed.write().remove(account);
    }
}

impl CallerAuth for AllowListAuth {
    fn is_authentic(&self, account: &AccountId) -> bool {
        self.allowed.read().contains(account)
    }
}
