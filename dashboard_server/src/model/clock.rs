//! Time source for quote timestamps.
//!
//! The store never calls `Utc::now()` directly; it asks a `Clock`. Production code uses
//! [`SystemClock`], tests inject a [`ManualClock`] and move time by hand.
use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;
