use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// An instant on a recording's timeline, as seconds plus nanoseconds.
///
/// Values are kept normalized (`nsec < 1_000_000_000`) so the derived
/// lexicographic ordering on `(sec, nsec)` is the temporal ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp {
    pub sec: i64,
    pub nsec: u32,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp { sec: 0, nsec: 0 };

    /// Create a timestamp, carrying overflowing nanoseconds into seconds.
    pub fn new(sec: i64, nsec: u32) -> Self {
        let carry = (nsec / NANOS_PER_SEC) as i64;
        Self {
            sec: sec + carry,
            nsec: nsec % NANOS_PER_SEC,
        }
    }

    pub fn from_secs(sec: i64) -> Self {
        Self { sec, nsec: 0 }
    }

    pub fn from_nanos(nanos: i128) -> Self {
        let sec = nanos.div_euclid(NANOS_PER_SEC as i128) as i64;
        let nsec = nanos.rem_euclid(NANOS_PER_SEC as i128) as u32;
        Self { sec, nsec }
    }

    pub fn as_nanos(&self) -> i128 {
        self.sec as i128 * NANOS_PER_SEC as i128 + self.nsec as i128
    }

    /// Convert to a UTC wall-clock time, when representable by chrono.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.sec, self.nsec).single()
    }

    pub fn from_utc(time: DateTime<Utc>) -> Self {
        Self::new(time.timestamp(), time.timestamp_subsec_nanos())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.sec, self.nsec)
    }
}

/// The inclusive `[start, end]` interval a recording covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeSpan {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: Timestamp) -> bool {
        self.start <= time && time <= self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn union(&self, other: &TimeSpan) -> TimeSpan {
        TimeSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
