use serde::{Deserialize, Serialize};

use crate::time::Duration;

/// How the jobs of a task are released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleasePattern {
    /// Jobs are released at least `min_inter_arrival` time units
    /// apart and, if bounded, at most `max_inter_arrival` time units
    /// apart.
    Sporadic {
        min_inter_arrival: Duration,
        max_inter_arrival: Option<Duration>,
    },
    /// Strictly periodic releases: the `n`-th job (counting from zero)
    /// is released at time `phase + n * period`.
    Periodic { period: Duration, phase: Duration },
}

impl ReleasePattern {
    /// Minimum separation of two consecutive releases.
    pub fn min_inter_arrival(&self) -> Duration {
        match *self {
            ReleasePattern::Sporadic {
                min_inter_arrival, ..
            } => min_inter_arrival,
            ReleasePattern::Periodic { period, .. } => period,
        }
    }

    /// Maximum separation of two consecutive releases, if bounded.
    pub fn max_inter_arrival(&self) -> Option<Duration> {
        match *self {
            ReleasePattern::Sporadic {
                max_inter_arrival, ..
            } => max_inter_arrival,
            ReleasePattern::Periodic { period, .. } => Some(period),
        }
    }

    pub fn period(&self) -> Option<Duration> {
        match *self {
            ReleasePattern::Periodic { period, .. } => Some(period),
            ReleasePattern::Sporadic { .. } => None,
        }
    }

    /// Release time of the first job (periodic tasks only).
    pub fn phase(&self) -> Option<Duration> {
        match *self {
            ReleasePattern::Periodic { phase, .. } => Some(phase),
            ReleasePattern::Sporadic { .. } => None,
        }
    }

    pub fn is_periodic(&self) -> bool {
        matches!(self, ReleasePattern::Periodic { .. })
    }

    pub(super) fn validate(&self) -> Result<(), super::TaskError> {
        match *self {
            ReleasePattern::Periodic { period, .. } if period.is_zero() => {
                Err(super::TaskError::ZeroPeriod)
            }
            ReleasePattern::Sporadic {
                min_inter_arrival,
                max_inter_arrival: Some(max),
            } if max < min_inter_arrival => Err(super::TaskError::InterArrivalOrder {
                min: min_inter_arrival,
                max,
            }),
            _ => Ok(()),
        }
    }
}
