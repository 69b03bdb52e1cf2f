/*! End-to-end timing analyses of LET cause-effect chains

This module provides two analyses that bound the maximum reaction time
(MRT), the maximum data age (MDA), and their reduced variants (MRRT and
MRDA) of a [Chain]:

- [baseline] enumerates all immediate forward and backward augmented
  job chains within the analysis horizon and takes the maximum length,
  which is correct by definition of reaction time and data age;
- [optimized] determines the point at which the chain's job alignment
  converges and enumerates only partitioned job chains anchored at the
  task with the largest period.

Both analyses are exposed through the common [EndToEndAnalysis] trait
so that they can be compared against each other (see
[crate::harness]). They must agree exactly on every chain.
*/

use auto_impl::auto_impl;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::{Chain, ChainError};
use crate::time::{Duration, JobIndex};

pub mod baseline;
pub mod optimized;

pub use baseline::{analyze_baseline, Baseline};
pub use optimized::{analyze_optimized, Optimized};

/// The four end-to-end metrics computed by the analyses.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[display(fmt = "MDA")]
    Mda,
    #[display(fmt = "MRDA")]
    Mrda,
    #[display(fmt = "MRT")]
    Mrt,
    #[display(fmt = "MRRT")]
    Mrrt,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Mda, Metric::Mrda, Metric::Mrt, Metric::Mrrt];
}

/// Error type returned when an analysis cannot produce a result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    Chain(#[from] ChainError),
    /// No job chain qualified within the analysis horizon.
    #[error("no valid job chain found within the analysis horizon for {metric}")]
    NoValidJobChain { metric: Metric },
    /// The job alignment of the chain did not converge where expected,
    /// which means that the horizon or the chain's parameters are
    /// malformed.
    #[error("job chain partitioned at task {partition} and anchored at job {anchor} is incomplete")]
    Unconverged { partition: usize, anchor: JobIndex },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Maximum (reduced) reaction time and data age of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub mda: Duration,
    pub mrda: Duration,
    pub mrt: Duration,
    pub mrrt: Duration,
}

impl Metrics {
    /// Derive all four metrics from a single end-to-end latency that
    /// is both the MRT and the MDA of `chain`. The reduced variants
    /// drop one period of the first task (reaction time) or of the
    /// last task (data age), respectively.
    pub fn from_end_to_end(e2e: Duration, chain: &Chain) -> Metrics {
        Metrics {
            mda: e2e,
            mrda: e2e.saturating_sub(chain.sink().period()),
            mrt: e2e,
            mrrt: e2e.saturating_sub(chain.source().period()),
        }
    }

    pub fn get(&self, metric: Metric) -> Duration {
        match metric {
            Metric::Mda => self.mda,
            Metric::Mrda => self.mrda,
            Metric::Mrt => self.mrt,
            Metric::Mrrt => self.mrrt,
        }
    }

    /// The metrics in which `self` and `other` differ.
    pub fn mismatches(&self, other: &Metrics) -> Vec<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .filter(|m| self.get(*m) != other.get(*m))
            .collect()
    }
}

/// Result of an analysis together with the number of job chains it
/// had to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub metrics: Metrics,
    pub examined_job_chains: usize,
}

/// The common interface of end-to-end analyses.
#[auto_impl(&, Box, Rc)]
pub trait EndToEndAnalysis {
    /// Short human-readable name of the analysis.
    fn name(&self) -> &'static str;

    /// Analyze `chain` and report how much work was needed.
    fn examine(&self, chain: &Chain) -> AnalysisResult<Outcome>;

    /// Analyze `chain`.
    fn analyze(&self, chain: &Chain) -> AnalysisResult<Metrics> {
        self.examine(chain).map(|outcome| outcome.metrics)
    }
}
