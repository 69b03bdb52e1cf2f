/*! Discrete time model

All quantities are integral ticks in a caller-defined unit. Interval
lengths ([Duration]) are never negative; points in time ([Instant]) may
precede time zero, which happens whenever a job-index computation
yields a sentinel job that does not actually exist. */

use derive_more::{Add, AddAssign, Display, From, Into};
use serde::{Deserialize, Serialize};

/// The length of an interval (e.g., a period, a phase offset, a
/// deadline, or an end-to-end latency).
///
/// Durations can be added; differences go through
/// [Duration::saturating_sub] so that they cannot underflow.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Add,
    AddAssign,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Duration(u64);

impl Duration {
    /// The empty interval.
    pub const fn zero() -> Self {
        Duration(0)
    }

    /// Raw number of ticks.
    pub const fn ticks(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtract without underflowing below zero.
    pub fn saturating_sub(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_sub(rhs.0))
    }

    /// The interval length as a signed tick count, for index
    /// arithmetic that may produce negative values.
    pub(crate) fn signed(self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

/// A point in time relative to time zero, which is the earliest
/// possible release of any task.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into,
)]
pub struct Instant(i64);

impl Instant {
    pub const fn zero() -> Self {
        Instant(0)
    }

    /// The point in time that lies `offset` time units after time zero.
    pub fn from_time_zero(offset: Duration) -> Self {
        Instant(offset.signed())
    }

    /// Raw (signed) number of ticks since time zero.
    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// The length of the interval from `earlier` to `self`.
    ///
    /// Saturates at zero if `earlier` actually lies after `self`.
    pub fn duration_since(self, earlier: Instant) -> Duration {
        debug_assert!(earlier <= self, "{} does not precede {}", earlier, self);
        Duration(u64::try_from(self.0 - earlier.0).unwrap_or(0))
    }
}

impl std::ops::Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant(self.0 + rhs.signed())
    }
}

impl std::ops::Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        Instant(self.0 - rhs.signed())
    }
}

/// Instance number of a job; zero denotes the first release.
/// Negative values denote jobs that do not exist.
pub type JobIndex = i64;

/// Integer division rounding towards negative infinity.
pub(crate) fn div_floor(a: i64, b: i64) -> i64 {
    a.div_euclid(b)
}

/// Integer division rounding towards positive infinity.
pub(crate) fn div_ceil(a: i64, b: i64) -> i64 {
    -(-a).div_euclid(b)
}
