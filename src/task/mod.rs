/*! The task model

A [Task] is described by up to four orthogonal facets: its
[ReleasePattern], its [Deadline], its [Execution] time bounds, and its
[CommunicationPolicy]. Each facet is optional, but the facets that are
present must be mutually consistent (e.g., a constrained deadline must
not exceed the minimum inter-arrival time). Tasks are assembled with a
[TaskBuilder], which checks all cross-facet invariants at once.
*/

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::Duration;

mod communication;
mod deadline;
mod execution;
mod release;
mod spec;

pub use communication::CommunicationPolicy;
pub use deadline::Deadline;
pub use execution::Execution;
pub use release::ReleasePattern;
pub use spec::{DeadlineSpec, ExecutionSpec, ReleaseSpec, TaskSpec};

/// Error type returned when task parameters are inconsistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("non-negative value expected for {field}, received {value}")]
    Negative { field: &'static str, value: i64 },
    #[error("the period of a periodic task must be positive")]
    ZeroPeriod,
    #[error("minimum inter-arrival time {min} exceeds maximum inter-arrival time {max}")]
    InterArrivalOrder { min: Duration, max: Duration },
    #[error("constrained deadline {deadline} exceeds minimum inter-arrival time {min_inter_arrival}")]
    DeadlineExceedsInterArrival {
        deadline: Duration,
        min_inter_arrival: Duration,
    },
    #[error("best-case execution time {bcet} exceeds worst-case execution time {wcet}")]
    ExecutionOrder { bcet: Duration, wcet: Duration },
    #[error("implicit deadline is {implicit}, cannot assign {assigned}")]
    ImplicitDeadlineMismatch {
        implicit: Duration,
        assigned: Duration,
    },
    #[error("an implicit deadline requires a release pattern")]
    ImplicitDeadlineWithoutRelease,
    #[error("unknown communication policy {0:?}, expected \"implicit\" or \"LET\"")]
    UnknownCommunicationPolicy(String),
}

/// A (recurrent) real-time task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskSpec", into = "TaskSpec")]
pub struct Task {
    release: Option<ReleasePattern>,
    deadline: Option<Deadline>,
    execution: Option<Execution>,
    communication: Option<CommunicationPolicy>,
}

impl Task {
    /// Start assembling a new task.
    pub fn builder() -> TaskBuilder {
        TaskBuilder::default()
    }

    /// Shortcut for the common case in the LET setting: a periodic
    /// task with implicit deadline that communicates via LET.
    pub fn periodic_let(period: Duration, phase: Duration) -> Result<Task, TaskError> {
        Task::builder()
            .periodic(period, phase)
            .implicit_deadline()
            .communication(CommunicationPolicy::Let)
            .build()
    }

    pub fn release(&self) -> Option<&ReleasePattern> {
        self.release.as_ref()
    }

    /// The deadline facet as specified (see [Task::deadline] for its value).
    pub fn deadline_kind(&self) -> Option<&Deadline> {
        self.deadline.as_ref()
    }

    /// The effective relative deadline. For implicit deadlines, this
    /// is computed from the release pattern on every call.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
            .as_ref()
            .and_then(|dl| dl.resolve(self.release.as_ref()))
    }

    pub fn execution(&self) -> Option<&Execution> {
        self.execution.as_ref()
    }

    pub fn communication(&self) -> Option<CommunicationPolicy> {
        self.communication
    }

    pub fn period(&self) -> Option<Duration> {
        self.release.as_ref().and_then(ReleasePattern::period)
    }

    pub fn phase(&self) -> Option<Duration> {
        self.release.as_ref().and_then(ReleasePattern::phase)
    }

    /// Fraction of the processor required in the worst case, i.e.,
    /// `wcet / min_inter_arrival`. Requires both the execution and
    /// the release facet.
    pub fn utilization(&self) -> Option<f64> {
        let wcet = self.execution.as_ref()?.wcet;
        let miniat = self.release.as_ref()?.min_inter_arrival();
        if miniat.is_zero() {
            None
        } else {
            Some(wcet.ticks() as f64 / miniat.ticks() as f64)
        }
    }

    /// Assign a new value to the relative deadline.
    ///
    /// For implicit deadlines, only the value implied by the release
    /// pattern may be assigned (which has no effect). Constrained
    /// deadlines are checked against the minimum inter-arrival time.
    /// A task without deadline facet receives an arbitrary deadline.
    pub fn assign_deadline(&mut self, value: Duration) -> Result<(), TaskError> {
        let updated = match self.deadline {
            Some(Deadline::Implicit) => {
                let implicit = self
                    .deadline()
                    .ok_or(TaskError::ImplicitDeadlineWithoutRelease)?;
                if implicit != value {
                    return Err(TaskError::ImplicitDeadlineMismatch {
                        implicit,
                        assigned: value,
                    });
                }
                Deadline::Implicit
            }
            Some(Deadline::Constrained(_)) => Deadline::Constrained(value),
            Some(Deadline::Arbitrary(_)) | None => Deadline::Arbitrary(value),
        };
        updated.validate(self.release.as_ref())?;
        self.deadline = Some(updated);
        Ok(())
    }
}

/// Incremental construction of a [Task]; all checks happen in
/// [TaskBuilder::build].
#[derive(Debug, Clone, Default)]
pub struct TaskBuilder {
    release: Option<ReleasePattern>,
    deadline: Option<Deadline>,
    execution: Option<Execution>,
    communication: Option<CommunicationPolicy>,
}

impl TaskBuilder {
    pub fn release(mut self, release: ReleasePattern) -> Self {
        self.release = Some(release);
        self
    }

    pub fn periodic(self, period: Duration, phase: Duration) -> Self {
        self.release(ReleasePattern::Periodic { period, phase })
    }

    pub fn sporadic(self, min_inter_arrival: Duration, max_inter_arrival: Option<Duration>) -> Self {
        self.release(ReleasePattern::Sporadic {
            min_inter_arrival,
            max_inter_arrival,
        })
    }

    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn arbitrary_deadline(self, dl: Duration) -> Self {
        self.deadline(Deadline::Arbitrary(dl))
    }

    pub fn constrained_deadline(self, dl: Duration) -> Self {
        self.deadline(Deadline::Constrained(dl))
    }

    pub fn implicit_deadline(self) -> Self {
        self.deadline(Deadline::Implicit)
    }

    pub fn execution(mut self, bcet: Duration, wcet: Duration) -> Self {
        self.execution = Some(Execution { bcet, wcet });
        self
    }

    pub fn communication(mut self, policy: CommunicationPolicy) -> Self {
        self.communication = Some(policy);
        self
    }

    /// Check all facets and their mutual consistency.
    pub fn build(self) -> Result<Task, TaskError> {
        if let Some(rel) = &self.release {
            rel.validate()?;
        }
        if let Some(dl) = &self.deadline {
            dl.validate(self.release.as_ref())?;
        }
        if let Some(ex) = &self.execution {
            ex.validate()?;
        }
        Ok(Task {
            release: self.release,
            deadline: self.deadline,
            execution: self.execution,
            communication: self.communication,
        })
    }
}
