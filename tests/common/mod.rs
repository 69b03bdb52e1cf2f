#![allow(dead_code)]
//! Shared integration test utilities.
//!
//! Import with:
//! ```
//! mod common;
//! use common::*;
//! ```

use std::sync::Once;

use let_chain_analysis::chain::TaskSet;
use let_chain_analysis::task::{CommunicationPolicy, Deadline, Task};
use let_chain_analysis::time::Duration;
use proptest::prelude::*;
use proptest::test_runner::RngSeed;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Seed for property tests when running under CI.
pub const DEFAULT_PROPTEST_SEED: u64 = 0x5EED_1E7;

const PROPTEST_SEED_ENV: &str = "LET_PROPTEST_SEED";

/// Install a test-friendly subscriber once. The filter is taken from
/// `RUST_LOG` and defaults to `warn`.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}

fn read_proptest_seed() -> Option<u64> {
    if let Ok(value) = std::env::var(PROPTEST_SEED_ENV) {
        return value.parse::<u64>().ok();
    }
    if std::env::var("CI").is_ok() {
        return Some(DEFAULT_PROPTEST_SEED);
    }
    None
}

/// Build a ProptestConfig with deterministic seed support for CI.
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    let mut config = ProptestConfig::with_cases(cases);
    if matches!(config.rng_seed, RngSeed::Random) {
        if let Some(seed) = read_proptest_seed() {
            config.rng_seed = RngSeed::Fixed(seed);
        }
    }
    config
}

/// Periods used in automotive benchmark systems.
pub const WATERS_PERIODS: [u64; 9] = [1, 2, 5, 10, 20, 50, 100, 200, 1000];

/// Small periods with a small hyperperiod.
pub const SMALL_PERIODS: [u64; 8] = [2, 3, 4, 5, 6, 8, 10, 12];

/// Timing parameters of one generated task.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub period: u64,
    pub phase: u64,
    pub deadline: Deadline,
}

pub fn let_task(p: &Params) -> Task {
    Task::builder()
        .periodic(Duration::from(p.period), Duration::from(p.phase))
        .deadline(p.deadline)
        .communication(CommunicationPolicy::Let)
        .build()
        .unwrap()
}

pub fn task_set(params: &[Params]) -> TaskSet {
    params.iter().map(let_task).collect()
}

/// How generated tasks choose their phase and deadline.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// No phase, implicit deadline.
    Synchronous,
    /// Any phase below the period, deadline up to twice the period.
    Arbitrary,
    /// Any phase below the period, deadline at most the period.
    Constrained,
}

pub fn arb_params(periods: &'static [u64], shape: Shape) -> impl Strategy<Value = Params> {
    proptest::sample::select(periods).prop_flat_map(move |period| {
        let phase = match shape {
            Shape::Synchronous => Just(0).boxed(),
            _ => (0..period).boxed(),
        };
        let deadline = match shape {
            Shape::Synchronous => Just(Deadline::Implicit).boxed(),
            Shape::Arbitrary => (0..=2 * period)
                .prop_map(|dl| Deadline::Arbitrary(Duration::from(dl)))
                .boxed(),
            Shape::Constrained => (0..=period)
                .prop_map(|dl| Deadline::Constrained(Duration::from(dl)))
                .boxed(),
        };
        (phase, deadline).prop_map(move |(phase, deadline)| Params {
            period,
            phase,
            deadline,
        })
    })
}

/// A base task set together with the positions of a chain drawn from it.
pub fn arb_system(
    periods: &'static [u64],
    shape: Shape,
    max_tasks: usize,
) -> impl Strategy<Value = (Vec<Params>, Vec<usize>)> {
    proptest::collection::vec(arb_params(periods, shape), 1..=max_tasks).prop_flat_map(|params| {
        let n = params.len();
        let positions = proptest::sample::subsequence((0..n).collect::<Vec<_>>(), 1..=n).prop_shuffle();
        (Just(params), positions)
    })
}
