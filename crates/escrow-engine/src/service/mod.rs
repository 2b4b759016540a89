//! # Service Module
//!
//! The lifecycle engine plus the out-of-band maintenance and reporting
//! components sharing its store.

pub mod lifecycle;
pub mod reaper;
pub mod stats;

pub use lifecycle::{Collaborators, EscrowService};
pub use reaper::ExpiryReaper;
pub use stats::{StatsReporter, StatsSnapshot};
