//! Time source abstraction for cache expiry
//!
//! The loader's TTL cache never reads the wall clock directly; it asks a
//! `Clock` so tests can drive expiry deterministically.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// A source of wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current time as `chrono::DateTime<Utc>`.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for development and testing.
///
/// Starts at a fixed instant and only moves when told to, which makes
/// TTL-expiry assertions exact instead of sleep-based.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.write();
        *now += delta;
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.write() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
