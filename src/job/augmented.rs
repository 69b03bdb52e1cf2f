use super::{earliest_index_at_or_after, Job, JobChain};
use crate::chain::Chain;
use crate::time::{Duration, Instant, JobIndex};

/// A job chain together with the external activation that triggers it
/// and the actuation at which its result becomes visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentedJobChain {
    external_activation: Instant,
    jobs: JobChain,
    actuation: Instant,
}

impl AugmentedJobChain {
    /// The `number`-th immediate forward augmented job chain: the
    /// stimulus arrives at the read event of the `number`-th source
    /// job and is first sampled by the next source job.
    pub fn forward(chain: &Chain, number: JobIndex) -> Self {
        let external_activation = Job::new(*chain.source(), number).read_event();
        let jobs = JobChain::forward(chain.tasks(), number + 1);
        let actuation = jobs.last().write_event();
        AugmentedJobChain {
            external_activation,
            jobs,
            actuation,
        }
    }

    /// The `number`-th immediate backward augmented job chain: the
    /// actuation happens at the write event of the `number`-th sink
    /// job, which shows the data of the preceding sink job.
    pub fn backward(chain: &Chain, number: JobIndex) -> Self {
        let actuation = Job::new(*chain.sink(), number).write_event();
        let jobs = JobChain::backward(chain.tasks(), number - 1);
        let external_activation = jobs.first().read_event();
        AugmentedJobChain {
            external_activation,
            jobs,
            actuation,
        }
    }

    pub fn external_activation(&self) -> Instant {
        self.external_activation
    }

    pub fn jobs(&self) -> &JobChain {
        &self.jobs
    }

    pub fn actuation(&self) -> Instant {
        self.actuation
    }

    pub fn is_complete(&self) -> bool {
        self.jobs.is_complete()
    }

    /// Length from external activation to actuation.
    pub fn ell(&self) -> Duration {
        self.actuation.duration_since(self.external_activation)
    }

    /// Length of the inner job chain only (reduced reaction time / data age).
    pub fn ellstar(&self) -> Duration {
        self.jobs.ell()
    }

    /// Whether the external activation lies in the steady state of
    /// `chain`: the source job following the activation must be
    /// released strictly after the first job of every task in the
    /// chain.
    pub fn is_valid(&self, chain: &Chain) -> bool {
        let source = chain.source();
        let activation_index = earliest_index_at_or_after(self.external_activation, source);
        Job::new(*source, activation_index + 1).read_event() > chain.latest_first_read()
    }
}
