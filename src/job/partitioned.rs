use super::JobChain;
use crate::chain::{Chain, ChainError};
use crate::time::{Duration, Instant, JobIndex};

/// A backward job chain over the tasks `0..=partition`, spliced with a
/// forward job chain over the tasks `partition..`.
///
/// Both halves are anchored at the partition task: the backward half
/// ends with its `anchor`-th job and the forward half starts with the
/// next one. The partition task therefore contributes two consecutive
/// jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionedJobChain {
    partition: usize,
    anchor: JobIndex,
    backward: JobChain,
    forward: JobChain,
}

impl PartitionedJobChain {
    pub fn new(chain: &Chain, partition: usize, anchor: JobIndex) -> Result<Self, ChainError> {
        if partition >= chain.len() {
            return Err(ChainError::PartitionOutOfRange {
                partition,
                length: chain.len(),
            });
        }
        let tasks = chain.tasks();
        Ok(PartitionedJobChain {
            partition,
            anchor,
            backward: JobChain::backward(&tasks[..=partition], anchor),
            forward: JobChain::forward(&tasks[partition..], anchor + 1),
        })
    }

    pub fn partition(&self) -> usize {
        self.partition
    }

    pub fn anchor(&self) -> JobIndex {
        self.anchor
    }

    pub fn backward(&self) -> &JobChain {
        &self.backward
    }

    pub fn forward(&self) -> &JobChain {
        &self.forward
    }

    /// The read event of the first job of the backward half.
    pub fn first_read(&self) -> Instant {
        self.backward.first().read_event()
    }

    pub fn is_complete(&self) -> bool {
        self.backward.is_complete()
    }

    /// Time from the first read event of the backward half to the last
    /// write event of the forward half.
    pub fn ell(&self) -> Duration {
        self.forward.last().write_event().duration_since(self.first_read())
    }
}
