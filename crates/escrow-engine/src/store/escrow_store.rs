//! # Escrow Store
//!
//! Keyed collection of escrow records with three access paths:
//! by id (primary), by sender, and by ascending expiry for the
//! reaper's bounded scan.
//!
//! The store itself is a plain data structure; callers wrap it in a
//! `parking_lot::RwLock` so readers never observe a half-written record.

use crate::domain::{AccountId, EscrowId, EscrowRecord, EscrowStatus};
use std::collections::{BTreeSet, HashMap};

/// In-memory escrow record store with secondary orderings.
#[derive(Debug, Default)]
pub struct EscrowStore {
    records: HashMap<EscrowId, EscrowRecord>,
    by_sender: HashMap<AccountId, BTreeSet<EscrowId>>,
    by_expiry: BTreeSet<(u64, EscrowId)>,
    next_id: EscrowId,
}

impl EscrowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh identifier not currently in use. Strictly increasing;
    /// consumed only by `insert`.
    pub fn available_id(&self) -> EscrowId {
        self.next_id
    }

    /// Insert a new record under `available_id()`.
    ///
    /// The record's `id` field must already carry `available_id()`;
    /// call this in the same write-lock scope that read it.
    pub fn insert(&mut self, record: EscrowRecord) -> EscrowId {
        let id = record.id;
        debug_assert_eq!(id, self.next_id, "record id must come from available_id()");
        self.by_sender.entry(record.sender.clone()).or_default().insert(id);
        self.by_expiry.insert((record.expiry, id));
        self.records.insert(id, record);
        self.next_id = id + 1;
        id
    }

    /// Look up a record by id.
    pub fn get(&self, id: EscrowId) -> Option<&EscrowRecord> {
        self.records.get(&id)
    }

    /// Finalize a record's status.
    ///
    /// Only `status` ever changes after insertion, so the secondary
    /// orderings stay valid. Returns false for an unknown id.
    pub fn set_status(&mut self, id: EscrowId, status: EscrowStatus) -> bool {
        match self.records.get_mut(&id) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }

    /// Delete a record, maintaining both secondary orderings.
    pub fn remove(&mut self, id: EscrowId) -> Option<EscrowRecord> {
        let record = self.records.remove(&id)?;
        self.by_expiry.remove(&(record.expiry, id));
        if let Some(ids) = self.by_sender.get_mut(&record.sender) {
            ids.remove(&id);
            if ids.is_empty() {
                self.by_sender.remove(&record.sender);
            }
        }
        Some(record)
    }

    /// Records created by `sender`, in id order.
    pub fn by_sender(&self, sender: &AccountId) -> Vec<&EscrowRecord> {
        self.by_sender
            .get(sender)
            .into_iter()
            .flatten()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Scan records in ascending expiry order.
    pub fn iter_by_expiry(&self) -> impl Iterator<Item = &EscrowRecord> {
        self.by_expiry
            .iter()
            .filter_map(move |(_, id)| self.records.get(id))
    }

    /// Iterate all records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &EscrowRecord> {
        self.records.values()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
