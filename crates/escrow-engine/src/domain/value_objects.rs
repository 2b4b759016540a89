//! # Domain Value Objects
//!
//! Immutable value types for the escrow engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger account identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account id.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// View as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Currency key: issuing contract plus symbol code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Currency {
    /// Issuing contract or authority.
    pub issuer: String,
    /// Symbol code, e.g. "EOS".
    pub symbol: String,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.symbol, self.issuer)
    }
}

/// Currency-typed quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Magnitude in the currency's smallest unit.
    pub amount: i64,
    /// Currency this quantity is denominated in.
    pub currency: Currency,
}

impl Asset {
    /// Create a new asset quantity.
    pub fn new(amount: i64, symbol: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            amount,
            currency: Currency {
                issuer: issuer.into(),
                symbol: symbol.into(),
            },
        }
    }

    /// Well-formed and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.amount > 0 && !self.currency.symbol.is_empty() && !self.currency.issuer.is_empty()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Escrow record state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowStatus {
    /// Funds locked, awaiting claim or expiry.
    #[default]
    Open,
    /// Secret revealed, funds transferred to recipient.
    Claimed,
    /// Past expiry, funds returned to sender.
    Refunded,
}

impl EscrowStatus {
    /// Check if a transition is valid at `current_time` for a record
    /// expiring at `expiry`.
    pub fn can_transition_to(&self, next: EscrowStatus, current_time: u64, expiry: u64) -> bool {
        match (self, next) {
            (Self::Open, Self::Claimed) => current_time < expiry,
            (Self::Open, Self::Refunded) => current_time >= expiry,
            _ => false,
        }
    }

    /// Check if terminal state (no outgoing transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Claimed | Self::Refunded)
    }
}

/// Opaque foreign-chain coordination fields.
///
/// Carried verbatim for off-chain coordination; never interpreted by
/// the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRef {
    /// Foreign-chain transaction hash.
    pub tx_hash: String,
    /// Foreign asset identifier.
    pub asset: String,
    /// Foreign amount, as rendered by the foreign chain.
    pub amount: String,
}
