//! Injectable time source for analysis timestamps.

use chrono::{DateTime, Utc};

/// Source of the `analysis_timestamp` stamped on each record.
///
/// Production code uses [`SystemClock`]; tests inject [`FixedClock`] so
/// repeated runs over identical inputs produce byte-identical records.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the instant it was constructed with.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
