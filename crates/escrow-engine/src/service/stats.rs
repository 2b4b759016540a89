//! # Stats Reporter
//!
//! Read-only aggregation over the escrow store: counts per status and
//! locked value per currency. A pure full scan with no side effects.

use crate::domain::{Currency, EscrowStatus};
use crate::store::EscrowStore;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Point-in-time aggregate over the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Records held, any status.
    pub total: u64,
    /// Records still awaiting claim or refund.
    pub open: u64,
    /// Records claimed.
    pub claimed: u64,
    /// Records refunded.
    pub refunded: u64,
    /// Sum of `amount` over `Open` records, per currency.
    pub locked_value: BTreeMap<Currency, i64>,
}

/// Aggregates escrow store contents.
pub struct StatsReporter {
    store: Arc<RwLock<EscrowStore>>,
}

impl StatsReporter {
    pub(crate) fn new(store: Arc<RwLock<EscrowStore>>) -> Self {
        Self { store }
    }

    /// Scan the store and build a snapshot.
    pub fn get_stats(&self) -> StatsSnapshot {
        let store = self.store.read();
        let mut snapshot = StatsSnapshot::default();
        for record in store.iter() {
            snapshot.total += 1;
            match record.status {
                EscrowStatus::Open => {
                    snapshot.open += 1;
                    let locked = snapshot
                        .locked_value
                        .entry(record.amount.currency.clone())
                        .or_insert(0);
                    *locked = locked.saturating_add(record.amount.amount);
                }
                EscrowStatus::Claimed => snapshot.claimed += 1,
                EscrowStatus::Refunded => snapshot.refunded += 1,
            }
        }
        snapshot
    }
}
