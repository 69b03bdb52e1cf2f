//! Serialized representation of tasks.
//!
//! Task sets produced by an external generator arrive as plain data
//! (e.g., TOML or JSON). Values are read as signed integers so that
//! negative inputs can be reported as [TaskError::Negative] instead of
//! as an opaque parse failure.

use serde::{Deserialize, Serialize};

use super::{CommunicationPolicy, Deadline, Execution, ReleasePattern, Task, TaskError};
use crate::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReleaseSpec {
    Periodic {
        period: i64,
        #[serde(default)]
        phase: i64,
    },
    Sporadic {
        min_inter_arrival: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_inter_arrival: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeadlineSpec {
    Arbitrary {
        value: i64,
    },
    Constrained {
        value: i64,
    },
    /// An implicit deadline may carry a value, which must then agree
    /// with the minimum inter-arrival time.
    Implicit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSpec {
    #[serde(default)]
    pub bcet: i64,
    pub wcet: i64,
}

/// Plain-data mirror of [Task].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DeadlineSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<ExecutionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication: Option<String>,
}

fn non_negative(field: &'static str, value: i64) -> Result<Duration, TaskError> {
    u64::try_from(value)
        .map(Duration::from)
        .map_err(|_| TaskError::Negative { field, value })
}

impl TryFrom<TaskSpec> for Task {
    type Error = TaskError;

    fn try_from(spec: TaskSpec) -> Result<Task, TaskError> {
        let mut builder = Task::builder();

        let release = match spec.release {
            Some(ReleaseSpec::Periodic { period, phase }) => Some(ReleasePattern::Periodic {
                period: non_negative("period", period)?,
                phase: non_negative("phase", phase)?,
            }),
            Some(ReleaseSpec::Sporadic {
                min_inter_arrival,
                max_inter_arrival,
            }) => Some(ReleasePattern::Sporadic {
                min_inter_arrival: non_negative("min_inter_arrival", min_inter_arrival)?,
                max_inter_arrival: max_inter_arrival
                    .map(|max| non_negative("max_inter_arrival", max))
                    .transpose()?,
            }),
            None => None,
        };
        if let Some(rel) = release {
            builder = builder.release(rel);
        }

        match spec.deadline {
            Some(DeadlineSpec::Arbitrary { value }) => {
                builder = builder.arbitrary_deadline(non_negative("deadline", value)?)
            }
            Some(DeadlineSpec::Constrained { value }) => {
                builder = builder.constrained_deadline(non_negative("deadline", value)?)
            }
            Some(DeadlineSpec::Implicit { value }) => {
                if let Some(value) = value {
                    let assigned = non_negative("deadline", value)?;
                    let implicit = release
                        .as_ref()
                        .map(ReleasePattern::min_inter_arrival)
                        .ok_or(TaskError::ImplicitDeadlineWithoutRelease)?;
                    if implicit != assigned {
                        return Err(TaskError::ImplicitDeadlineMismatch { implicit, assigned });
                    }
                }
                builder = builder.implicit_deadline()
            }
            None => (),
        }

        if let Some(ExecutionSpec { bcet, wcet }) = spec.execution {
            builder = builder.execution(non_negative("bcet", bcet)?, non_negative("wcet", wcet)?);
        }

        if let Some(policy) = spec.communication {
            builder = builder.communication(policy.parse::<CommunicationPolicy>()?);
        }

        builder.build()
    }
}

impl From<Task> for TaskSpec {
    fn from(task: Task) -> TaskSpec {
        TaskSpec {
            release: task.release().map(|rel| match *rel {
                ReleasePattern::Periodic { period, phase } => ReleaseSpec::Periodic {
                    period: period.signed(),
                    phase: phase.signed(),
                },
                ReleasePattern::Sporadic {
                    min_inter_arrival,
                    max_inter_arrival,
                } => ReleaseSpec::Sporadic {
                    min_inter_arrival: min_inter_arrival.signed(),
                    max_inter_arrival: max_inter_arrival.map(Duration::signed),
                },
            }),
            deadline: task.deadline_kind().map(|dl| match *dl {
                Deadline::Arbitrary(value) => DeadlineSpec::Arbitrary {
                    value: value.signed(),
                },
                Deadline::Constrained(value) => DeadlineSpec::Constrained {
                    value: value.signed(),
                },
                Deadline::Implicit => DeadlineSpec::Implicit { value: None },
            }),
            execution: task.execution().map(|&Execution { bcet, wcet }| ExecutionSpec {
                bcet: bcet.signed(),
                wcet: wcet.signed(),
            }),
            communication: task.communication().map(String::from),
        }
    }
}
