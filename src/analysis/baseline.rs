//! Reference analysis by exhaustive enumeration of augmented job chains.

use tracing::debug;

use super::{AnalysisError, AnalysisResult, EndToEndAnalysis, Metric, Metrics, Outcome};
use crate::chain::Chain;
use crate::job::AugmentedJobChain;
use crate::time::{Duration, Instant};

/// Maximum augmented and reduced lengths over a set of job chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainMaxima {
    /// Maximum of [AugmentedJobChain::ell].
    pub ell: Duration,
    /// Maximum of [AugmentedJobChain::ellstar].
    pub ellstar: Duration,
    /// Number of augmented job chains constructed, whether they
    /// qualified or not.
    pub examined_job_chains: usize,
}

/// Running maxima of an enumeration.
#[derive(Default)]
struct Tracker {
    maxima: Option<(Duration, Duration)>,
    examined: usize,
}

impl Tracker {
    fn examine(mut self, ajc: &AugmentedJobChain, qualifies: bool) -> Self {
        self.examined += 1;
        if qualifies {
            let (ell, ellstar) = self.maxima.unwrap_or_default();
            self.maxima = Some((ell.max(ajc.ell()), ellstar.max(ajc.ellstar())));
        }
        self
    }

    fn finish(self, metric: Metric) -> AnalysisResult<ChainMaxima> {
        let (ell, ellstar) = self
            .maxima
            .ok_or(AnalysisError::NoValidJobChain { metric })?;
        Ok(ChainMaxima {
            ell,
            ellstar,
            examined_job_chains: self.examined,
        })
    }
}

/// Maximum reaction time (`ell`) and maximum reduced reaction time
/// (`ellstar`) over all valid immediate forward augmented job chains
/// whose external activation is no later than `horizon`.
pub fn reaction_time(chain: &Chain, horizon: Instant) -> AnalysisResult<ChainMaxima> {
    chain.check_event_range(horizon)?;
    (0..)
        .map(|number| AugmentedJobChain::forward(chain, number))
        .take_while(|ajc| ajc.external_activation() <= horizon)
        .fold(Tracker::default(), |tracker, ajc| {
            let valid = ajc.is_valid(chain);
            tracker.examine(&ajc, valid)
        })
        .finish(Metric::Mrt)
}

/// Maximum data age (`ell`) and maximum reduced data age (`ellstar`)
/// over all complete and valid immediate backward augmented job chains
/// whose external activation is no later than `horizon`.
pub fn data_age(chain: &Chain, horizon: Instant) -> AnalysisResult<ChainMaxima> {
    chain.check_event_range(horizon)?;
    (0..)
        .map(|number| AugmentedJobChain::backward(chain, number))
        .take_while(|ajc| ajc.external_activation() <= horizon)
        .fold(Tracker::default(), |tracker, ajc| {
            let qualifies = ajc.is_complete() && ajc.is_valid(chain);
            tracker.examine(&ajc, qualifies)
        })
        .finish(Metric::Mda)
}

/// Run the baseline analysis up to an explicitly given horizon.
///
/// The horizon must be at least [Chain::analysis_horizon] for the
/// result to be safe; larger horizons yield the same result. Horizons
/// at which job events would leave the representable time range are
/// rejected with [ChainError::DeadlineOverflow](crate::chain::ChainError::DeadlineOverflow).
pub fn analyze_within(chain: &Chain, horizon: Instant) -> AnalysisResult<Outcome> {
    let mrt = reaction_time(chain, horizon)?;
    let mda = data_age(chain, horizon)?;
    let outcome = Outcome {
        metrics: Metrics {
            mda: mda.ell,
            mrda: mda.ellstar,
            mrt: mrt.ell,
            mrrt: mrt.ellstar,
        },
        examined_job_chains: mrt.examined_job_chains + mda.examined_job_chains,
    };
    debug!(
        horizon = %horizon,
        mrt = %outcome.metrics.mrt,
        mda = %outcome.metrics.mda,
        examined = outcome.examined_job_chains,
        "baseline analysis finished"
    );
    Ok(outcome)
}

/// Brute-force enumeration of augmented job chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct Baseline;

impl EndToEndAnalysis for Baseline {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn examine(&self, chain: &Chain) -> AnalysisResult<Outcome> {
        analyze_within(chain, chain.analysis_horizon()?)
    }
}

/// Compute MDA, MRDA, MRT, and MRRT of `chain` by exhaustive
/// enumeration.
pub fn analyze_baseline(chain: &Chain) -> AnalysisResult<Metrics> {
    Baseline.analyze(chain)
}
