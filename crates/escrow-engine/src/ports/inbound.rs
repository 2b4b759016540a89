//! # Inbound Ports
//!
//! Command surface of the escrow engine. Any RPC, CLI, or library
//! binding routes into this trait.

use crate::domain::{AccountId, CreateEscrow, EscrowError, EscrowId, EscrowRecord, SecretBytes};
use crate::service::stats::StatsSnapshot;
use async_trait::async_trait;

/// Escrow engine API - inbound port.
#[async_trait]
pub trait EscrowApi: Send + Sync {
    /// Validate and create a new escrow, moving the amount from the
    /// sender into the engine's escrow account. Returns the new id.
    async fn create_escrow(&self, request: CreateEscrow) -> Result<EscrowId, EscrowError>;

    /// Claim an open, unexpired escrow by revealing its secret.
    async fn claim(
        &self,
        id: EscrowId,
        secret: SecretBytes,
        claimer: AccountId,
    ) -> Result<(), EscrowError>;

    /// Refund an open, expired escrow back to its sender.
    async fn refund(&self, id: EscrowId, refunder: AccountId) -> Result<(), EscrowError>;

    /// Pure read of one record.
    fn get(&self, id: EscrowId) -> Result<EscrowRecord, EscrowError>;

    /// Records created by `sender`.
    fn escrows_of(&self, sender: &AccountId) -> Vec<EscrowRecord>;

    /// Delete up to `max_records` finalized records past the retention
    /// window. Privileged: `caller` must be the configured operator.
    fn cleanup(&self, caller: &AccountId, max_records: u64) -> Result<u64, EscrowError>;

    /// Read-only aggregation over the store.
    fn stats(&self) -> StatsSnapshot;
}
