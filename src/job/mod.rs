/*! Jobs and chains of jobs under LET

A [Job] is one instance of a periodic LET task. A [JobChain] contains
one job per task of a cause-effect chain and describes one concrete way
in which data propagates through the chain:

- the *immediate forward* chain ([JobChain::forward]) follows the data
  produced by a given job of the first task, i.e., each job is the
  earliest one that reads the output of its predecessor;
- the *immediate backward* chain ([JobChain::backward]) traces the data
  consumed by a given job of the last task back to its origin, i.e.,
  each job is the latest one whose output is read by its successor.

On top of these, [AugmentedJobChain]s add the external activation and
the actuation needed to define reaction time and data age, and
[PartitionedJobChain]s splice a backward and a forward chain at an
intermediate task.
*/

use std::fmt;

use crate::chain::LetTask;
use crate::time::{Duration, Instant, JobIndex};

mod augmented;
pub mod events;
mod partitioned;

pub use augmented::AugmentedJobChain;
pub use events::{earliest_index_at_or_after, latest_index_at_or_before, read_event, write_event};
pub use partitioned::PartitionedJobChain;

/// The `index`-th job of a task. Jobs with negative indices do not
/// exist; their events are well-defined numbers, but meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    task: LetTask,
    index: JobIndex,
}

impl Job {
    pub fn new(task: LetTask, index: JobIndex) -> Self {
        Job { task, index }
    }

    pub fn task(&self) -> &LetTask {
        &self.task
    }

    pub fn index(&self) -> JobIndex {
        self.index
    }

    /// Whether the job is actually released (i.e., is not a sentinel).
    pub fn exists(&self) -> bool {
        self.index >= 0
    }

    pub fn read_event(&self) -> Instant {
        read_event(self)
    }

    pub fn write_event(&self) -> Instant {
        write_event(self)
    }
}

/// A non-empty sequence of jobs, one per task of a (sub)chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobChain {
    jobs: Vec<Job>,
}

impl JobChain {
    /// The immediate forward job chain that starts with the `start`-th
    /// job of the first task in `tasks`.
    ///
    /// # Panics
    ///
    /// Panics if `tasks` is empty.
    pub fn forward(tasks: &[LetTask], start: JobIndex) -> JobChain {
        let (source, rest) = tasks
            .split_first()
            .expect("job chains need at least one task");
        let mut jobs = Vec::with_capacity(tasks.len());
        let mut prev = Job::new(*source, start);
        jobs.push(prev);
        for task in rest {
            prev = Job::new(
                *task,
                earliest_index_at_or_after(prev.write_event(), task),
            );
            jobs.push(prev);
        }
        JobChain { jobs }
    }

    /// The immediate backward job chain that ends with the `end`-th job
    /// of the last task in `tasks`.
    ///
    /// If at some point no job satisfies the backward relation, the
    /// chain is incomplete (see [JobChain::is_complete]); the jobs
    /// preceding that point are still computed.
    ///
    /// # Panics
    ///
    /// Panics if `tasks` is empty.
    pub fn backward(tasks: &[LetTask], end: JobIndex) -> JobChain {
        let (sink, rest) = tasks
            .split_last()
            .expect("job chains need at least one task");
        let mut jobs = Vec::with_capacity(tasks.len());
        let mut next = Job::new(*sink, end);
        jobs.push(next);
        for task in rest.iter().rev() {
            next = Job::new(*task, latest_index_at_or_before(next.read_event(), task));
            jobs.push(next);
        }
        jobs.reverse();
        JobChain { jobs }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Always false; job chains have one job per task.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn first(&self) -> &Job {
        &self.jobs[0]
    }

    pub fn last(&self) -> &Job {
        &self.jobs[self.jobs.len() - 1]
    }

    /// The job indices, in chain order.
    pub fn indices(&self) -> impl Iterator<Item = JobIndex> + '_ {
        self.jobs.iter().map(Job::index)
    }

    /// A chain is complete if its first job exists. Forward chains
    /// started at an existing job are always complete.
    pub fn is_complete(&self) -> bool {
        self.first().exists()
    }

    /// Time from the first read event to the last write event.
    pub fn ell(&self) -> Duration {
        self.last()
            .write_event()
            .duration_since(self.first().read_event())
    }
}

impl fmt::Display for JobChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for (k, job) in self.jobs.iter().enumerate() {
            if k > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "#{}", job.index)?;
        }
        write!(f, " ]")
    }
}

#[cfg(test)]
mod tests;
