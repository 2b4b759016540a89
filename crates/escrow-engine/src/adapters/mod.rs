//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports.

mod asset_ledger;
mod auth;
mod clock;
mod directory;

pub use asset_ledger::InMemoryAssetLedger;
pub use auth::{AllowListAuth, PermissiveAuth};
pub use clock::{ManualClock, SystemClock};
pub use directory::InMemoryAccountDirectory;
