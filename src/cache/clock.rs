//! Wall-clock source for suppression decisions
//!
//! Records store Unix seconds, so the clock reports Unix seconds rather than `Instant`s.

use std::fmt::Debug;

use chrono::Utc;

/// Port for reading the current time
pub trait Clock: Send + Sync + Debug {
    /// Current Unix timestamp in seconds (UTC)
    fn now(&self) -> i64;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}
