/*! Equivalence and timing harness

The harness runs the [Baseline] and the [Optimized] analysis on the
same chains, checks that they agree exactly, and records how long each
one took and how many job chains it had to construct. The resulting
[Comparison]s are serializable so that an external driver can collect
and report them.
*/

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::{AnalysisError, Baseline, EndToEndAnalysis, Metric, Metrics, Optimized, Outcome};
use crate::chain::Chain;

pub mod config;
pub mod timing;

pub use config::{ConfigError, HarnessConfig};
pub use timing::min_wall_time;

/// Error type returned by the harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{analysis} analysis failed: {source}")]
    Analysis {
        analysis: &'static str,
        source: AnalysisError,
    },
    #[error("analyses disagree on {mismatches:?}")]
    Mismatch { mismatches: Vec<Metric> },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The results of both analyses on one chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub chain_length: usize,
    pub involved_activation_patterns: usize,
    pub baseline: Metrics,
    pub optimized: Metrics,
    pub baseline_time: std::time::Duration,
    pub optimized_time: std::time::Duration,
    pub baseline_job_chains: usize,
    pub optimized_job_chains: usize,
}

impl Comparison {
    /// Whether both analyses agree on all four metrics.
    pub fn is_equal(&self) -> bool {
        self.baseline == self.optimized
    }

    pub fn mismatches(&self) -> Vec<Metric> {
        self.baseline.mismatches(&self.optimized)
    }

    pub fn ensure_equal(&self) -> Result<(), HarnessError> {
        if self.is_equal() {
            Ok(())
        } else {
            Err(HarnessError::Mismatch {
                mismatches: self.mismatches(),
            })
        }
    }

    /// How many times faster the optimized analysis ran.
    ///
    /// # Notes
    ///
    /// With a coarse clock, a run may be measured as taking no time at
    /// all. The ratio is undefined then and `None` is returned.
    pub fn speedup(&self) -> Option<f64> {
        ratio(self.baseline_time, self.optimized_time)
    }

    /// Runtime of the optimized analysis relative to the baseline, or
    /// `None` if the baseline was measured as taking no time.
    pub fn time_ratio(&self) -> Option<f64> {
        ratio(self.optimized_time, self.baseline_time)
    }
}

fn ratio(num: std::time::Duration, denom: std::time::Duration) -> Option<f64> {
    if denom.is_zero() {
        None
    } else {
        Some(num.as_secs_f64() / denom.as_secs_f64())
    }
}

fn timed<A: EndToEndAnalysis>(
    analysis: A,
    chain: &Chain,
    repetitions: usize,
) -> Result<(Outcome, std::time::Duration), HarnessError> {
    let (outcome, time) = min_wall_time(repetitions, || analysis.examine(chain));
    outcome
        .map(|o| (o, time))
        .map_err(|source| HarnessError::Analysis {
            analysis: analysis.name(),
            source,
        })
}

/// Run and time both analyses on `chain`.
///
/// A disagreement between the analyses is logged but not an error;
/// use [Comparison::ensure_equal] to turn it into one.
pub fn compare(chain: &Chain, config: &HarnessConfig) -> Result<Comparison, HarnessError> {
    let (baseline, baseline_time) = timed(Baseline, chain, config.repetitions)?;
    let (optimized, optimized_time) = timed(Optimized, chain, config.repetitions)?;
    let cmp = Comparison {
        chain_length: chain.len(),
        involved_activation_patterns: chain.involved_activation_patterns(),
        baseline: baseline.metrics,
        optimized: optimized.metrics,
        baseline_time,
        optimized_time,
        baseline_job_chains: baseline.examined_job_chains,
        optimized_job_chains: optimized.examined_job_chains,
    };
    if cmp.is_equal() {
        info!(
            length = cmp.chain_length,
            patterns = cmp.involved_activation_patterns,
            baseline_job_chains = cmp.baseline_job_chains,
            optimized_job_chains = cmp.optimized_job_chains,
            speedup = ?cmp.speedup(),
            "analyses agree"
        );
    } else {
        warn!(
            positions = ?chain.positions(),
            mismatches = ?cmp.mismatches(),
            baseline = ?cmp.baseline,
            optimized = ?cmp.optimized,
            "analyses disagree"
        );
    }
    Ok(cmp)
}

/// Run [compare] on each chain in turn. Failures are reported per chain.
pub fn compare_all(chains: &[Chain<'_>], config: &HarnessConfig) -> Vec<Result<Comparison, HarnessError>> {
    chains.iter().map(|chain| compare(chain, config)).collect()
}

#[cfg(test)]
mod tests;
