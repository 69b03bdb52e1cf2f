/*! Analysis by enumeration of partitioned job chains

Under LET, the alignment of the jobs in a chain repeats once all tasks
have started releasing jobs. The first complete job chain that spans
from the first job of the source to the sink job that observes it marks
the point of convergence. From there on, it is sufficient to anchor
job chains at the task with the largest period and to extend them in
both directions, which needs far fewer job chains than enumerating
every external activation.

The longest partitioned job chain is at the same time the maximum
reaction time and the maximum data age of the chain. The reduced
variants follow by subtracting the period of the source or sink task.
*/

use itertools::Itertools;
use tracing::{debug, trace};

use super::{AnalysisError, AnalysisResult, EndToEndAnalysis, Metric, Metrics, Outcome};
use crate::chain::Chain;
use crate::job::{JobChain, PartitionedJobChain};
use crate::time::{Duration, Instant, JobIndex};

/// Job indices, per task of `chain`, at which the job alignment has
/// converged.
///
/// These are the indices of the backward job chain that ends at the
/// last job of the forward job chain starting with the first source
/// job.
pub fn convergence_indices(chain: &Chain) -> AnalysisResult<Vec<JobIndex>> {
    let fw = JobChain::forward(chain.tasks(), 0);
    let end = fw.last().index();
    let bw = JobChain::backward(chain.tasks(), end);
    if !bw.is_complete() {
        return Err(AnalysisError::Unconverged {
            partition: chain.len() - 1,
            anchor: end,
        });
    }
    trace!(forward = %fw, backward = %bw, "job alignment converged");
    Ok(bw.indices().collect())
}

/// The position of the task with the largest period in `chain`. If
/// several tasks share the largest period, the last one is chosen.
pub fn partition_task(chain: &Chain) -> usize {
    chain
        .tasks()
        .iter()
        .position_max_by_key(|t| t.period())
        .unwrap_or(0)
}

/// The longest partitioned job chain found within the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndToEnd {
    pub latency: Duration,
    pub partition: usize,
    pub examined_job_chains: usize,
}

/// Enumerate the partitioned job chains of `chain`, starting at the
/// point of convergence, until the first read event of the backward
/// half exceeds `horizon`.
pub fn end_to_end(chain: &Chain, horizon: Instant) -> AnalysisResult<EndToEnd> {
    chain.check_event_range(horizon)?;
    let partition = partition_task(chain);
    let start = convergence_indices(chain)?[partition];

    let mut longest: Option<Duration> = None;
    let mut examined_job_chains = 0;
    for anchor in start.. {
        let pjc = PartitionedJobChain::new(chain, partition, anchor)?;
        if pjc.first_read() > horizon {
            break;
        }
        if !pjc.is_complete() {
            return Err(AnalysisError::Unconverged { partition, anchor });
        }
        examined_job_chains += 1;
        longest = longest.max(Some(pjc.ell()));
    }

    let latency = longest.ok_or(AnalysisError::NoValidJobChain {
        metric: Metric::Mrt,
    })?;
    Ok(EndToEnd {
        latency,
        partition,
        examined_job_chains,
    })
}

/// Run the optimized analysis up to an explicitly given horizon.
pub fn analyze_within(chain: &Chain, horizon: Instant) -> AnalysisResult<Outcome> {
    let e2e = end_to_end(chain, horizon)?;
    debug!(
        horizon = %horizon,
        partition = e2e.partition,
        latency = %e2e.latency,
        examined = e2e.examined_job_chains,
        "optimized analysis finished"
    );
    Ok(Outcome {
        metrics: Metrics::from_end_to_end(e2e.latency, chain),
        examined_job_chains: e2e.examined_job_chains,
    })
}

/// Enumeration of partitioned job chains from the point of convergence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimized;

impl EndToEndAnalysis for Optimized {
    fn name(&self) -> &'static str {
        "optimized"
    }

    fn examine(&self, chain: &Chain) -> AnalysisResult<Outcome> {
        analyze_within(chain, chain.analysis_horizon()?)
    }
}

/// Compute MDA, MRDA, MRT, and MRRT of `chain` from its longest
/// partitioned job chain.
pub fn analyze_optimized(chain: &Chain) -> AnalysisResult<Metrics> {
    Optimized.analyze(chain)
}
