//! # Outbound Ports
//!
//! Traits for the engine's external collaborators: the asset ledger,
//! the account directory, the clock, and the caller authenticator.

use crate::domain::value_objects::{AccountId, Asset};
use async_trait::async_trait;
use thiserror::Error;

/// Errors originating in the asset ledger.
///
/// Propagated to callers untranslated; the engine never retries.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Source account cannot cover the transfer.
    #[error("insufficient funds: {account} holds {held}, needs {needed}")]
    InsufficientFunds {
        /// Debited account
        account: AccountId,
        /// Balance held in the transfer currency
        held: i64,
        /// Amount requested
        needed: i64,
    },

    /// Account unknown to the ledger.
    #[error("unknown ledger account: {0}")]
    UnknownAccount(AccountId),

    /// Ledger refused the transfer for its own reasons.
    #[error("ledger rejected transfer: {0}")]
    Rejected(String),
}

/// Atomic value transfer between accounts - outbound port.
///
/// A transfer either moves the full amount or fails with no partial
/// movement. This call is the engine's only blocking point.
#[async_trait]
pub trait AssetLedger: Send + Sync {
    /// Move `amount` from `from` to `to`, tagging the ledger entry
    /// with `memo`.
    async fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: &Asset,
        memo: &str,
    ) -> Result<(), TransferError>;
}

/// Account existence checks - outbound port.
pub trait AccountDirectory: Send + Sync {
    /// Does this account exist?
    fn exists(&self, account: &AccountId) -> bool;
}

/// Trusted wall-clock source - outbound port.
///
/// Lifecycle operations read this exactly once per invocation.
pub trait Clock: Send + Sync {
    /// Current time as Unix seconds.
    fn now(&self) -> u64;
}

/// Caller authentication - outbound port.
///
/// Verifies that the invoking caller controls the claimed account
/// identity before lifecycle logic runs.
pub trait CallerAuth: Send + Sync {
    /// Does the current invocation genuinely act for `account`?
    fn is_authentic(&self, account: &AccountId) -> bool;
}
