//! # Domain Errors
//!
//! Error taxonomy for the escrow lifecycle.
//!
//! Every error aborts the whole invocation with zero observable state
//! change; partial mutation is a correctness bug.

use super::value_objects::{AccountId, Asset, EscrowStatus};
use crate::ports::outbound::TransferError;
use thiserror::Error;

/// Hashlock type (32-byte SHA-256 digest).
pub type HashLock = [u8; 32];

/// Escrow record identifier, allocated monotonically by the store.
pub type EscrowId = u64;

/// Escrow engine error types.
#[derive(Debug, Error)]
pub enum EscrowError {
    /// Amount is malformed or not strictly positive.
    #[error("invalid amount: {0}")]
    InvalidAmount(Asset),

    /// Account does not exist in the directory.
    #[error("unknown account: {0}")]
    UnknownAccount(AccountId),

    /// Requested timelock is outside the configured window.
    #[error("timelock out of bounds: {requested}s (allowed {min}s..={max}s)")]
    TimelockOutOfBounds {
        /// Requested timelock in seconds
        requested: u64,
        /// Configured minimum
        min: u64,
        /// Configured maximum
        max: u64,
    },

    /// Memo exceeds the configured length limit.
    #[error("memo too long: {len} chars (max {max})")]
    MemoTooLong {
        /// Actual memo length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// No escrow record with this id.
    #[error("escrow not found: {0}")]
    NotFound(EscrowId),

    /// Operation requires an `Open` record.
    #[error("escrow {id} is not open (status: {status:?})")]
    NotOpen {
        /// Record id
        id: EscrowId,
        /// Current terminal status
        status: EscrowStatus,
    },

    /// Claim attempted at or after expiry.
    #[error("escrow {id} expired (expiry {expiry}, now {now})")]
    Expired {
        /// Record id
        id: EscrowId,
        /// Expiry timestamp
        expiry: u64,
        /// Clock reading for this invocation
        now: u64,
    },

    /// Refund attempted before expiry.
    #[error("escrow {id} not yet expired (expiry {expiry}, now {now})")]
    NotYetExpired {
        /// Record id
        id: EscrowId,
        /// Expiry timestamp
        expiry: u64,
        /// Clock reading for this invocation
        now: u64,
    },

    /// Caller is not the party authorized for this action.
    #[error("caller {caller} is not authorized to {action}")]
    Unauthorized {
        /// Offending caller
        caller: AccountId,
        /// Attempted action
        action: &'static str,
    },

    /// Caller failed the authentication collaborator's check.
    #[error("caller {0} failed authentication")]
    Unauthenticated(AccountId),

    /// Revealed secret does not hash to the stored hashlock.
    #[error("secret does not match hashlock for escrow {0}")]
    HashMismatch(EscrowId),

    /// Secret digest was already consumed by an earlier claim.
    #[error("secret already consumed (digest {})", hex::encode(.0))]
    SecretConsumed(HashLock),

    /// Propagated from the asset ledger, untranslated.
    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),
}
