//! # Secret Generation and Verification
//!
//! Cryptographic operations binding secrets to hashlocks.

use crate::domain::{HashLock, SecretBytes};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a cryptographically secure random secret.
pub fn generate_random_secret() -> SecretBytes {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    SecretBytes::new(bytes)
}

/// Derive the hashlock for a secret using SHA-256.
pub fn hashlock_for(secret: &SecretBytes) -> HashLock {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

/// Verify that a secret hashes to the given hashlock.
pub fn verify_secret(secret: &SecretBytes, hashlock: &HashLock) -> bool {
    hashlock_for(secret) == *hashlock
}
