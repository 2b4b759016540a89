//! # Secret Bytes
//!
//! Wrapper for HTLC secrets that zeroizes memory on drop.
//!
//! ## Security
//!
//! Secrets are sensitive cryptographic material that should not linger
//! in memory after use, and must never appear in logs. This wrapper
//! zeroes the bytes on drop and redacts `Debug` output.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte secret that zeroizes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes {
    inner: [u8; 32],
}

impl SecretBytes {
    /// Wrap secret bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { inner: bytes }
    }

    /// Create from a slice (copies into a fixed array).
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != 32 {
            return None;
        }
        let mut inner = [0u8; 32];
        inner.copy_from_slice(slice);
        Some(Self { inner })
    }

    /// Borrow the secret bytes. Use immediately, do not hold on to
    /// the reference.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.inner
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the actual secret
        f.write_str("SecretBytes(***)")
    }
}

// Hex serde so the raw bytes never pass through serializers unframed.
impl Serialize for SecretBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.inner))
    }
}

impl<'de> Deserialize<'de> for SecretBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        Self::from_slice(&bytes).ok_or_else(|| serde::de::Error::custom("invalid secret length"))
    }
}
