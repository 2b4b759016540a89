//! # Domain Invariants
//!
//! Business rules for escrow creation, claim, and refund. Each check
//! is a pure function over the inputs and a single clock reading.

use super::entities::{CreateEscrow, EscrowConfig, EscrowRecord};
use super::errors::{EscrowError, HashLock};
use super::value_objects::AccountId;

/// Invariant: amount is well-formed and strictly positive.
pub fn invariant_valid_amount(request: &CreateEscrow) -> Result<(), EscrowError> {
    if !request.amount.is_valid() {
        return Err(EscrowError::InvalidAmount(request.amount.clone()));
    }
    Ok(())
}

/// Invariant: timelock lies within the configured window.
///
/// Expiry therefore lies in `[created_at + min, created_at + max]`.
pub fn invariant_timelock_bounds(
    timelock_secs: u64,
    config: &EscrowConfig,
) -> Result<(), EscrowError> {
    if timelock_secs < config.min_timelock_secs || timelock_secs > config.max_timelock_secs {
        return Err(EscrowError::TimelockOutOfBounds {
            requested: timelock_secs,
            min: config.min_timelock_secs,
            max: config.max_timelock_secs,
        });
    }
    Ok(())
}

/// Invariant: memo fits the configured bound.
pub fn invariant_memo_bounds(memo: &str, config: &EscrowConfig) -> Result<(), EscrowError> {
    let len = memo.chars().count();
    if len > config.max_memo_len {
        return Err(EscrowError::MemoTooLong {
            len,
            max: config.max_memo_len,
        });
    }
    Ok(())
}

/// Invariant: only the designated recipient can claim.
pub fn invariant_authorized_claimer(
    record: &EscrowRecord,
    claimer: &AccountId,
) -> Result<(), EscrowError> {
    if *claimer != record.recipient {
        return Err(EscrowError::Unauthorized {
            caller: claimer.clone(),
            action: "claim",
        });
    }
    Ok(())
}

/// Invariant: only the original sender can refund.
pub fn invariant_authorized_refunder(
    record: &EscrowRecord,
    refunder: &AccountId,
) -> Result<(), EscrowError> {
    if *refunder != record.sender {
        return Err(EscrowError::Unauthorized {
            caller: refunder.clone(),
            action: "refund",
        });
    }
    Ok(())
}

/// Invariant: the revealed secret's digest equals the stored hashlock.
pub fn invariant_secret_matches(
    digest: &HashLock,
    record: &EscrowRecord,
) -> Result<(), EscrowError> {
    if *digest != record.hashlock {
        return Err(EscrowError::HashMismatch(record.id));
    }
    Ok(())
}
