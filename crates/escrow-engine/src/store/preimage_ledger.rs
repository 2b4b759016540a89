//! # Preimage Ledger
//!
//! Append-only set of consumed secret digests. Membership here is the
//! global replay protection: a digest claims at most once system-wide,
//! independent of which escrow it belonged to. Entries outlive record
//! retention; the only removal path is rolling back a claim whose
//! transfer failed.

use crate::domain::HashLock;
use std::collections::HashSet;

/// Global set of consumed secret digests.
#[derive(Debug, Default)]
pub struct PreimageLedger {
    used: HashSet<HashLock>,
}

impl PreimageLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Has this digest already backed a claim?
    pub fn is_used(&self, digest: &HashLock) -> bool {
        self.used.contains(digest)
    }

    /// Reserve a digest for a claim in flight. Returns false when the
    /// digest is already reserved or consumed.
    ///
    /// Check and insert are one step under the caller's write lock, so
    /// concurrent claims racing on a shared hashlock cannot both pass.
    pub fn reserve(&mut self, digest: HashLock) -> bool {
        self.used.insert(digest)
    }

    /// Roll back a reservation whose claim failed downstream.
    pub fn release(&mut self, digest: &HashLock) {
        self.used.remove(digest);
    }

    /// Number of reserved or consumed digests.
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// True when no digest has been consumed yet.
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
