//! # Algorithms Module
//!
//! Pure cryptographic helpers for the escrow lifecycle.

pub mod secret;

pub use secret::{generate_random_secret, hashlock_for, verify_secret};
