//! Read and write events of jobs under LET, and their inverses.
//!
//! These four functions are the only place where job indices and
//! points in time are converted into each other. All divisions are
//! exact integer divisions with explicit rounding direction.

use super::Job;
use crate::chain::LetTask;
use crate::time::{div_ceil, div_floor, Instant, JobIndex};

/// Point in time at which `job` reads its inputs (its release).
pub fn read_event(job: &Job) -> Instant {
    let task = job.task();
    Instant::from(task.phase().signed() + task.period().signed() * job.index())
}

/// Point in time at which `job` publishes its outputs (its deadline).
pub fn write_event(job: &Job) -> Instant {
    read_event(job) + job.task().deadline()
}

/// Index of the earliest job of `task` whose read event is at or after
/// `time`. Jobs before the first release do not exist, so the result is
/// never negative.
pub fn earliest_index_at_or_after(time: Instant, task: &LetTask) -> JobIndex {
    div_ceil(
        time.ticks() - task.phase().signed(),
        task.period().signed(),
    )
    .max(0)
}

/// Index of the latest job of `task` whose write event is at or before
/// `time`. The result is negative if no such job exists.
pub fn latest_index_at_or_before(time: Instant, task: &LetTask) -> JobIndex {
    div_floor(
        time.ticks() - task.phase().signed() - task.deadline().signed(),
        task.period().signed(),
    )
}
