use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::key::Key;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Hybrid logical clock value used to version keys.
///
/// `wall_time` is nanoseconds since the epoch as read from the physical
/// clock; `logical` breaks ties between events sharing one wall reading.
/// Ordering: wall_time first, then logical. The zero value is the default
/// and the smallest timestamp a clock hands out; `next`/`prev` step through
/// the full signed range of both fields, down to `Timestamp::MIN`.
///
/// This is only the comparable value. Advancing a clock, skew bounds and
/// merging remote readings belong to the clock source.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
    pub wall_time: i64,
    pub logical: i32,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp {
        wall_time: 0,
        logical: 0,
    };

    pub const MIN: Timestamp = Timestamp {
        wall_time: i64::MIN,
        logical: i32::MIN,
    };

    pub const MAX: Timestamp = Timestamp {
        wall_time: i64::MAX,
        logical: i32::MAX,
    };

    pub const fn new(wall_time: i64, logical: i32) -> Self {
        Timestamp { wall_time, logical }
    }

    pub fn is_zero(&self) -> bool {
        *self == Timestamp::ZERO
    }

    /// Offset by the given wall and logical deltas. Each field saturates
    /// at its own bounds.
    pub fn add(&self, wall_time: i64, logical: i32) -> Timestamp {
        Timestamp {
            wall_time: self.wall_time.saturating_add(wall_time),
            logical: self.logical.saturating_add(logical),
        }
    }

    /// Smallest timestamp strictly greater than `self`.
    /// Saturates at `Timestamp::MAX`.
    pub fn next(&self) -> Timestamp {
        if let Some(logical) = self.logical.checked_add(1) {
            return Timestamp::new(self.wall_time, logical);
        }
        match self.wall_time.checked_add(1) {
            Some(wall_time) => Timestamp::new(wall_time, i32::MIN),
            None => Timestamp::MAX,
        }
    }

    /// Largest timestamp strictly less than `self`.
    pub fn prev(&self) -> Result<Timestamp> {
        if let Some(logical) = self.logical.checked_sub(1) {
            return Ok(Timestamp::new(self.wall_time, logical));
        }
        match self.wall_time.checked_sub(1) {
            Some(wall_time) => Ok(Timestamp::new(wall_time, i32::MAX)),
            None => Err(Error::NoPredecessor("minimum timestamp")),
        }
    }

    /// Ratchet `self` up to `other`. Returns true if `self` moved.
    pub fn forward(&mut self, other: Timestamp) -> bool {
        if *self < other {
            *self = other;
            return true;
        }
        false
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:09},{}",
            self.wall_time.div_euclid(NANOS_PER_SECOND),
            self.wall_time.rem_euclid(NANOS_PER_SECOND),
            self.logical
        )
    }
}

/// A key at one version: what MVCC version resolution sorts and seeks on.
///
/// Ordering: (key ASC, timestamp DESC).
/// The newest version of a key comes first, so a seek to `(key, ts)` lands
/// on the newest version no newer than `ts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MvccKey {
    pub key: Key,
    pub timestamp: Timestamp,
}

impl MvccKey {
    pub fn new(key: Key, timestamp: Timestamp) -> Self {
        MvccKey { key, timestamp }
    }

    /// True if this version is visible to a read at `read_ts`.
    pub fn visible_at(&self, read_ts: Timestamp) -> bool {
        self.timestamp <= read_ts
    }
}

impl Ord for MvccKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| other.timestamp.cmp(&self.timestamp))
    }
}

impl PartialOrd for MvccKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MvccKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.key, self.timestamp)
    }
}
