/*! Task sets and cause-effect chains

A [Chain] is an ordered selection of tasks from a base [TaskSet]
through which data propagates: the first task (the *source*) samples an
external stimulus, each subsequent task reads the output of its
predecessor, and the last task (the *sink*) produces the final
actuation. The base set is retained because the analysis horizon
depends on *all* tasks in the system, not only on those in the chain.
*/

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::{CommunicationPolicy, Task};
use crate::time::{Duration, Instant};

/// Error type returned when a chain violates the preconditions of the
/// LET analyses.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    #[error("a cause-effect chain must contain at least one task")]
    Empty,
    #[error("position {position} does not refer to a task in a set of {size} tasks")]
    UnknownTask { position: usize, size: usize },
    #[error("task at position {position} is not periodic")]
    NotPeriodic { position: usize },
    #[error("task at position {position} has no deadline")]
    MissingDeadline { position: usize },
    #[error("task at position {position} does not communicate via LET")]
    NotLet { position: usize },
    #[error("partition {partition} is out of range for a chain of length {length}")]
    PartitionOutOfRange { partition: usize, length: usize },
    #[error("hyperperiod of the task set exceeds the representable time range")]
    HyperperiodOverflow,
    #[error("periods and deadlines of the chain push job events beyond the representable time range")]
    DeadlineOverflow,
}

/// The timing parameters of a periodic task that communicates via
/// LET: the `n`-th job reads its inputs at `phase + n * period` and
/// publishes its outputs `deadline` time units later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LetTask {
    period: Duration,
    phase: Duration,
    deadline: Duration,
}

impl LetTask {
    /// Extract the LET view of `task`. The `position` is only used to
    /// identify the offending task in the returned error.
    pub fn from_task(task: &Task, position: usize) -> Result<LetTask, ChainError> {
        let (period, phase) = match (task.period(), task.phase()) {
            (Some(period), Some(phase)) => (period, phase),
            _ => return Err(ChainError::NotPeriodic { position }),
        };
        let deadline = task
            .deadline()
            .ok_or(ChainError::MissingDeadline { position })?;
        if task.communication() != Some(CommunicationPolicy::Let) {
            return Err(ChainError::NotLet { position });
        }
        // a zero period cannot pass task validation
        debug_assert!(!period.is_zero());
        Ok(LetTask {
            period,
            phase,
            deadline,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn phase(&self) -> Duration {
        self.phase
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

/// The set of all tasks in the system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

impl TaskSet {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskSet { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        self.tasks.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter()
    }

    fn periods(&self) -> impl Iterator<Item = Result<Duration, ChainError>> + '_ {
        self.tasks
            .iter()
            .enumerate()
            .map(|(position, t)| t.period().ok_or(ChainError::NotPeriodic { position }))
    }

    /// The least common multiple of all periods in the set.
    pub fn hyperperiod(&self) -> Result<Duration, ChainError> {
        self.periods().try_fold(Duration::from(1), |h, period| {
            let (h, p) = (h.ticks(), period?.ticks());
            (h / gcd(h, p))
                .checked_mul(p)
                .map(Duration::from)
                .ok_or(ChainError::HyperperiodOverflow)
        })
    }

    /// The latest first release of any task in the set.
    pub fn max_phase(&self) -> Result<Duration, ChainError> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(position, t)| t.phase().ok_or(ChainError::NotPeriodic { position }))
            .try_fold(Duration::zero(), |max, phase| Ok(max.max(phase?)))
    }

    /// Select the tasks at the given positions (in propagation order)
    /// as a cause-effect chain.
    pub fn chain(&self, positions: &[usize]) -> Result<Chain<'_>, ChainError> {
        Chain::new(self, positions.to_vec())
    }
}

impl FromIterator<Task> for TaskSet {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        TaskSet::new(iter.into_iter().collect())
    }
}

/// A cause-effect chain: a non-empty sequence of periodic LET tasks
/// drawn from a base task set.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    base: &'a TaskSet,
    positions: Vec<usize>,
    tasks: Vec<LetTask>,
}

impl<'a> Chain<'a> {
    /// Construct the chain of the tasks at `positions` in `base`.
    ///
    /// Fails if the chain is empty, refers to tasks outside the set,
    /// or contains a task that is not a periodic LET task with a
    /// known deadline.
    pub fn new(base: &'a TaskSet, positions: Vec<usize>) -> Result<Chain<'a>, ChainError> {
        if positions.is_empty() {
            return Err(ChainError::Empty);
        }
        let tasks = positions
            .iter()
            .map(|&position| {
                base.get(position)
                    .ok_or(ChainError::UnknownTask {
                        position,
                        size: base.len(),
                    })
                    .and_then(|task| LetTask::from_task(task, position))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Chain {
            base,
            positions,
            tasks,
        })
    }

    pub fn base(&self) -> &'a TaskSet {
        self.base
    }

    /// Positions of the chain's tasks in the base set.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn tasks(&self) -> &[LetTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always false; provided for symmetry with [Chain::len].
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The first task of the chain.
    pub fn source(&self) -> &LetTask {
        &self.tasks[0]
    }

    /// The last task of the chain.
    pub fn sink(&self) -> &LetTask {
        &self.tasks[self.tasks.len() - 1]
    }

    /// Hyperperiod of the *base* task set.
    pub fn hyperperiod(&self) -> Result<Duration, ChainError> {
        self.base.hyperperiod()
    }

    /// Maximum phase in the *base* task set.
    pub fn max_phase(&self) -> Result<Duration, ChainError> {
        self.base.max_phase()
    }

    /// The end of the interval `[0, 2 * hyperperiod + max_phase]`
    /// within which every task exhibits its steady-state behavior.
    pub fn analysis_horizon(&self) -> Result<Instant, ChainError> {
        let hyperperiod = self.hyperperiod()?.ticks();
        let max_phase = self.max_phase()?.ticks();
        let end = hyperperiod
            .checked_mul(2)
            .and_then(|h| h.checked_add(max_phase))
            .ok_or(ChainError::HyperperiodOverflow)?;
        let horizon = i64::try_from(end)
            .map(Instant::from)
            .map_err(|_| ChainError::HyperperiodOverflow)?;
        self.check_event_range(horizon)?;
        Ok(horizon)
    }

    /// Bound on how far the events of the job chains examined up to
    /// some horizon can lie beyond it (or before time zero).
    fn event_margin(&self) -> Option<i64> {
        self.tasks
            .iter()
            .try_fold(0u64, |sum, t| {
                sum.checked_add(t.period.ticks())?
                    .checked_add(t.deadline.ticks())
            })
            .and_then(|sum| sum.checked_mul(4))
            .and_then(|margin| i64::try_from(margin).ok())
    }

    /// Check that all read and write events of the job chains examined
    /// up to `horizon` are representable as [Instant]s.
    pub fn check_event_range(&self, horizon: Instant) -> Result<(), ChainError> {
        let margin = self.event_margin().ok_or(ChainError::DeadlineOverflow)?;
        let t = horizon.ticks();
        match (t.checked_add(margin), t.checked_sub(margin)) {
            (Some(_), Some(_)) => Ok(()),
            _ => Err(ChainError::DeadlineOverflow),
        }
    }

    /// The latest read event among the first jobs of the chain's tasks.
    pub fn latest_first_read(&self) -> Instant {
        self.tasks
            .iter()
            .map(|t| Instant::from_time_zero(t.phase))
            .max()
            .unwrap_or_else(Instant::zero)
    }

    /// The number of distinct periods among the chain's tasks.
    pub fn involved_activation_patterns(&self) -> usize {
        self.tasks.iter().map(|t| t.period).unique().count()
    }
}
