//! # Clock Adapters
//!
//! System wall clock for deployments, manual clock for tests.

use crate::ports::outbound::Clock;
use parking_lot::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock backed by the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Manually driven clock for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<u64>,
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: u64) -> Self {
        Self { now: RwLock::new(now) }
    }

    /// Jump to an absolute time.
    pub fn set_time(&self, now: u64) {
        *self.now.write() = now;
    }

    /// Advance by `secs`.
    pub fn advance(&self, secs: u64) {
        *self.now.write() += secs;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        *self.now.read()
    }
}
