//! # Escrow Engine
//!
//! Trust-minimized escrow lifecycle using Hash Time-Locked Contracts (HTLC).
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Atomic swaps of value between two parties, optionally coordinated
//! with a foreign chain via opaque reference fields:
//! - SHA-256 hashlocks bind each escrow to a secret
//! - Timelocks bound the claim window and gate refunds
//! - A global preimage ledger prevents secret replay
//!
//! ## Lifecycle
//!
//! | Transition | Condition |
//! |------------|-----------|
//! | `Open -> Claimed` | recipient reveals the secret before expiry |
//! | `Open -> Refunded` | sender reclaims at or after expiry |
//!
//! `Claimed` and `Refunded` are terminal; a record transitions out of
//! `Open` exactly once. Fund movement and state mutation are one atomic
//! unit per invocation.
//!
//! ## Module Structure
//!
//! ```text
//! escrow-engine/
//! ├── domain/      # EscrowRecord, status machine, errors, invariants
//! ├── algorithms/  # Secret generation and hashlock verification
//! ├── store/       # Record store (id/sender/expiry views), preimage ledger
//! ├── service/     # Lifecycle, expiry reaper, stats reporter
//! ├── ports/       # EscrowApi, AssetLedger, AccountDirectory, Clock, auth
//! └── adapters/    # In-memory collaborators
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;
pub mod store;

// Re-exports
pub use algorithms::{generate_random_secret, hashlock_for, verify_secret};
pub use domain::{
    AccountId, Asset, CreateEscrow, Currency, EscrowConfig, EscrowError, EscrowId, EscrowRecord,
    EscrowStatus, ExternalRef, HashLock, SecretBytes,
};
pub use ports::{AccountDirectory, AssetLedger, CallerAuth, Clock, EscrowApi, TransferError};
pub use service::{Collaborators, EscrowService, ExpiryReaper, StatsReporter, StatsSnapshot};
pub use store::{EscrowStore, PreimageLedger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
