//! # Domain Module
//!
//! Core domain types for the escrow engine.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod secret;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use secret::SecretBytes;
pub use value_objects::*;
