//! # Ports Module
//!
//! Inbound command surface and outbound collaborator traits
//! (hexagonal architecture).

pub mod inbound;
pub mod outbound;

pub use inbound::EscrowApi;
pub use outbound::{AccountDirectory, AssetLedger, CallerAuth, Clock, TransferError};
