//! # Domain Entities
//!
//! The escrow record and its creation parameters.

use super::errors::{EscrowId, HashLock};
use super::value_objects::{AccountId, Asset, EscrowStatus, ExternalRef};
use serde::{Deserialize, Serialize};

/// One escrow, active or historical.
///
/// Every field except `status` is immutable after creation; `status`
/// transitions out of `Open` exactly once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscrowRecord {
    /// Unique identifier, allocated monotonically by the store.
    pub id: EscrowId,
    /// Account that locked the funds.
    pub sender: AccountId,
    /// Account entitled to claim with the secret.
    pub recipient: AccountId,
    /// Locked quantity.
    pub amount: Asset,
    /// SHA-256 digest committing to the secret.
    pub hashlock: HashLock,
    /// Absolute timestamp: claim allowed strictly before, refund at or after.
    pub expiry: u64,
    /// Current state.
    pub status: EscrowStatus,
    /// Bounded human-readable note.
    pub memo: String,
    /// Opaque foreign-chain coordination fields.
    pub external_ref: ExternalRef,
    /// Creation timestamp.
    pub created_at: u64,
}

impl EscrowRecord {
    /// Check if the record is past its expiry.
    pub fn is_expired(&self, current_time: u64) -> bool {
        current_time >= self.expiry
    }

    /// Check if claiming is allowed at `current_time`.
    pub fn can_claim(&self, current_time: u64) -> bool {
        self.status == EscrowStatus::Open && !self.is_expired(current_time)
    }

    /// Check if refunding is allowed at `current_time`.
    pub fn can_refund(&self, current_time: u64) -> bool {
        self.status == EscrowStatus::Open && self.is_expired(current_time)
    }
}

/// Parameters for `create_escrow`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateEscrow {
    /// Account locking the funds (must be the authenticated caller).
    pub sender: AccountId,
    /// Account entitled to claim.
    pub recipient: AccountId,
    /// Quantity to lock.
    pub amount: Asset,
    /// SHA-256 digest of the secret.
    pub hashlock: HashLock,
    /// Seconds until expiry, measured from creation.
    pub timelock_secs: u64,
    /// Human-readable note.
    pub memo: String,
    /// Opaque foreign-chain coordination fields.
    pub external_ref: ExternalRef,
}

/// Engine configuration.
///
/// Overriding these bounds never changes state-machine semantics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscrowConfig {
    /// Minimum timelock in seconds (1 hour).
    pub min_timelock_secs: u64,
    /// Maximum timelock in seconds (48 hours).
    pub max_timelock_secs: u64,
    /// How long finalized records are retained past expiry (24 hours).
    pub retention_window_secs: u64,
    /// Maximum memo length in characters.
    pub max_memo_len: usize,
    /// Account holding locked funds.
    pub escrow_account: AccountId,
    /// Identity allowed to run maintenance operations.
    pub operator: AccountId,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            min_timelock_secs: 3600,        // 1 hour
            max_timelock_secs: 48 * 3600,   // 48 hours
            retention_window_secs: 86_400,  // 24 hours
            max_memo_len: 256,
            escrow_account: AccountId::from("escrow.vault"),
            operator: AccountId::from("escrow.vault"),
        }
    }
}
