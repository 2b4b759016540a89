//! # Expiry Reaper
//!
//! Bounded maintenance sweep deleting finalized records once they are
//! older than the retention window. Runs outside the hot path over the
//! store's expiry-ordered view.

use crate::domain::{AccountId, EscrowConfig, EscrowError, EscrowId, EscrowStatus};
use crate::service::lifecycle::RecordLocks;
use crate::store::EscrowStore;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Deletes finalized, sufficiently old escrow records.
pub struct ExpiryReaper {
    config: EscrowConfig,
    store: Arc<RwLock<EscrowStore>>,
    locks: Arc<RecordLocks>,
    clock: Arc<dyn crate::ports::outbound::Clock>,
}

impl ExpiryReaper {
    pub(crate) fn new(
        config: EscrowConfig,
        store: Arc<RwLock<EscrowStore>>,
        locks: Arc<RecordLocks>,
        clock: Arc<dyn crate::ports::outbound::Clock>,
    ) -> Self {
        Self {
            config,
            store,
            locks,
            clock,
        }
    }

    /// Delete up to `max_records` finalized records whose expiry lies
    /// more than the retention window in the past. Returns the number
    /// deleted.
    ///
    /// Privileged: only the configured operator may run this. `Open`
    /// records are never deleted, even when long past expiry; an
    /// awaiting refund stays until finalized.
    pub fn cleanup(&self, caller: &AccountId, max_records: u64) -> Result<u64, EscrowError> {
        if *caller != self.config.operator {
            return Err(EscrowError::Unauthorized {
                caller: caller.clone(),
                action: "cleanup",
            });
        }

        let now = self.clock.now();
        let mut store = self.store.write();

        let mut doomed: Vec<EscrowId> = Vec::new();
        for record in store.iter_by_expiry() {
            if doomed.len() as u64 >= max_records {
                break;
            }
            // Ascending expiry order: once one record is inside the
            // retention window, every later one is too.
            if now.saturating_sub(record.expiry) <= self.config.retention_window_secs {
                break;
            }
            if record.status == EscrowStatus::Open {
                continue;
            }
            doomed.push(record.id);
        }

        for id in &doomed {
            store.remove(*id);
        }
        drop(store);
        self.locks.prune(&doomed);

        let deleted = doomed.len() as u64;
        if deleted > 0 {
            info!("[escrow] cleanup removed {} finalized records", deleted);
        }
        Ok(deleted)
    }
}
