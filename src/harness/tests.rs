use std::time::Duration as WallTime;

use assert_approx_eq::assert_approx_eq;

use crate::analysis::{AnalysisError, Metric};
use crate::chain::ChainError;
use crate::harness::{compare, compare_all, min_wall_time, Comparison, ConfigError, HarnessConfig, HarnessError};
use crate::tests::{d, let_set};

fn comparison(baseline_ms: u64, optimized_ms: u64) -> Comparison {
    let ts = let_set(&[(10, 0, 10), (15, 0, 15)]);
    let ce = ts.chain(&[0, 1]).unwrap();
    let mut cmp = compare(&ce, &HarnessConfig::with_repetitions(1).unwrap()).unwrap();
    cmp.baseline_time = WallTime::from_millis(baseline_ms);
    cmp.optimized_time = WallTime::from_millis(optimized_ms);
    cmp
}

#[test]
fn config_defaults() {
    assert_eq!(HarnessConfig::default().repetitions, 100);
    assert_eq!(HarnessConfig::from_toml("").unwrap(), HarnessConfig::default());
    assert_eq!(HarnessConfig::from_toml("repetitions = 7").unwrap().repetitions, 7);
}

#[test]
fn config_rejects_bad_input() {
    assert!(matches!(
        HarnessConfig::from_toml("repetitions = 0"),
        Err(ConfigError::ZeroRepetitions)
    ));
    assert!(matches!(
        HarnessConfig::with_repetitions(0),
        Err(ConfigError::ZeroRepetitions)
    ));
    assert!(matches!(
        HarnessConfig::from_toml("repetitions = \"many\""),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        HarnessConfig::from_toml("iterations = 3"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        HarnessConfig::from_file("/nonexistent/harness.toml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn config_from_file() {
    let path = std::env::temp_dir().join(format!("let-harness-{}.toml", std::process::id()));
    std::fs::write(&path, "repetitions = 3\n").unwrap();
    let config = HarnessConfig::from_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.unwrap().repetitions, 3);
}

#[test]
fn min_wall_time_repeats() {
    let mut calls = 0;
    let (last, _) = min_wall_time(5, || {
        calls += 1;
        calls
    });
    assert_eq!(last, 5);
    assert_eq!(calls, 5);

    let mut calls = 0;
    min_wall_time(0, || calls += 1);
    assert_eq!(calls, 1);
}

#[test]
fn compare_records_both_analyses() {
    let cmp = comparison(4, 1);
    assert!(cmp.is_equal());
    assert!(cmp.mismatches().is_empty());
    assert!(cmp.ensure_equal().is_ok());
    assert_eq!(cmp.chain_length, 2);
    assert_eq!(cmp.involved_activation_patterns, 2);
    assert_eq!(cmp.baseline.mrt, d(45));
    assert_eq!(cmp.baseline_job_chains, 14);
    assert_eq!(cmp.optimized_job_chains, 5);
}

#[test]
fn speedup_and_time_ratio() {
    let cmp = comparison(4, 1);
    assert_approx_eq!(cmp.speedup().unwrap(), 4.0);
    assert_approx_eq!(cmp.time_ratio().unwrap(), 0.25);
    let cmp = comparison(3, 6);
    assert_approx_eq!(cmp.speedup().unwrap(), 0.5);
    assert_approx_eq!(cmp.time_ratio().unwrap(), 2.0);
}

#[test]
fn ratios_of_unmeasurably_fast_runs() {
    let cmp = comparison(3, 0);
    assert_eq!(cmp.speedup(), None);
    assert_approx_eq!(cmp.time_ratio().unwrap(), 0.0);

    let cmp = comparison(0, 3);
    assert_approx_eq!(cmp.speedup().unwrap(), 0.0);
    assert_eq!(cmp.time_ratio(), None);

    let cmp = comparison(0, 0);
    assert_eq!(cmp.speedup(), None);
    assert_eq!(cmp.time_ratio(), None);
}

#[test]
fn mismatch_detection() {
    let mut cmp = comparison(1, 1);
    cmp.optimized.mrrt = d(34);
    assert!(!cmp.is_equal());
    assert_eq!(cmp.mismatches(), vec![Metric::Mrrt]);
    match cmp.ensure_equal() {
        Err(HarnessError::Mismatch { mismatches }) => assert_eq!(mismatches, vec![Metric::Mrrt]),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn compare_all_reports_per_chain() {
    let ts = let_set(&[(10, 0, 10), (15, 0, 15)]);
    let chains = vec![ts.chain(&[0, 1]).unwrap(), ts.chain(&[1, 0]).unwrap()];
    let config = HarnessConfig::with_repetitions(2).unwrap();
    let results = compare_all(&chains, &config);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.as_ref().map_or(false, Comparison::is_equal)));
}

#[test]
fn analysis_failures_name_the_analysis() {
    let ts = let_set(&[(u64::MAX / 2, 0, 1), (u64::MAX / 2 - 1, 0, 1)]);
    let ce = ts.chain(&[0]).unwrap();
    match compare(&ce, &HarnessConfig::with_repetitions(1).unwrap()) {
        Err(HarnessError::Analysis { analysis, source }) => {
            assert_eq!(analysis, "baseline");
            assert_eq!(source, AnalysisError::Chain(ChainError::HyperperiodOverflow));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn comparisons_serialize() {
    let cmp = comparison(2, 1);
    let text = toml::to_string(&cmp).unwrap();
    assert!(text.contains("chain_length = 2"));
    let back: Comparison = toml::from_str(&text).unwrap();
    assert_eq!(back, cmp);
}
