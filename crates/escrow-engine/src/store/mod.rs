//! # Store Module
//!
//! Persistent collections backing the lifecycle: the escrow record
//! store and the consumed-preimage ledger.

pub mod escrow_store;
pub mod preimage_ledger;

pub use escrow_store::EscrowStore;
pub use preimage_ledger::PreimageLedger;
