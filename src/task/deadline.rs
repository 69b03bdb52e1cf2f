use serde::{Deserialize, Serialize};

use super::ReleasePattern;
use crate::time::Duration;

/// The relative deadline of a task.
///
/// Under LET, the deadline is also the point (relative to its
/// release) at which a job publishes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deadline {
    /// Any relative deadline.
    Arbitrary(Duration),
    /// A relative deadline no larger than the minimum inter-arrival
    /// time of the task.
    Constrained(Duration),
    /// The relative deadline equals the minimum inter-arrival time of
    /// the task. The value is derived from the release pattern.
    Implicit,
}

impl Deadline {
    /// The effective relative deadline given the task's release
    /// pattern. An implicit deadline without a release pattern has no
    /// value.
    pub fn resolve(&self, release: Option<&ReleasePattern>) -> Option<Duration> {
        match *self {
            Deadline::Arbitrary(dl) | Deadline::Constrained(dl) => Some(dl),
            Deadline::Implicit => release.map(ReleasePattern::min_inter_arrival),
        }
    }

    pub(super) fn validate(&self, release: Option<&ReleasePattern>) -> Result<(), super::TaskError> {
        match (*self, release) {
            (Deadline::Constrained(deadline), Some(rel))
                if deadline > rel.min_inter_arrival() =>
            {
                Err(super::TaskError::DeadlineExceedsInterArrival {
                    deadline,
                    min_inter_arrival: rel.min_inter_arrival(),
                })
            }
            _ => Ok(()),
        }
    }
}
