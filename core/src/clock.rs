use std::fmt::Debug;
use std::sync::Arc;

use crate::time::{self, DateTime};

/// Clock is the capability used by the signer to read the current time.
///
/// Implementations must be cheap and never block: the signer calls
/// `now` once per signed or checked url that carries an expiry.
pub trait Clock: Debug + Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> DateTime;
}

impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> DateTime {
        self.as_ref().now()
    }
}

/// Clock backed by the system wall clock.
#[derive(Debug, Copy, Clone, Default)]
pub struct OsClock;

impl Clock for OsClock {
    fn now(&self) -> DateTime {
        time::now()
    }
}

/// StaticClock always returns the same instant.
///
/// This is useful for testing or for signing against a fixed point in time.
#[derive(Debug, Copy, Clone)]
pub struct StaticClock {
    now: DateTime,
}

impl StaticClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: DateTime) -> Self {
        Self { now }
    }

    /// Create a clock frozen at the given unix timestamp (seconds).
    ///
    /// Out of range timestamps fall back to the unix epoch.
    pub fn from_timestamp(secs: i64) -> Self {
        Self::new(time::from_timestamp(secs).unwrap_or_default())
    }
}

impl Clock for StaticClock {
    fn now(&self) -> DateTime {
        self.now
    }
}
