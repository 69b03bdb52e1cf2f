/*! End-to-end timing analysis of cause-effect chains under LET

This crate computes the maximum reaction time (MRT), the maximum data
age (MDA), and their reduced variants (MRRT and MRDA) of cause-effect
chains of periodic tasks that communicate according to the Logical
Execution Time (LET) paradigm: every job reads its inputs when it is
released and publishes its outputs exactly at its deadline.

The crate is organized as follows:

- [time] defines the discrete time model,
- [task] describes tasks and their (partly optional) timing parameters,
- [chain] selects tasks from a task set to form cause-effect chains,
- [job] models jobs and the various kinds of job chains,
- [analysis] contains the baseline and the optimized end-to-end analysis,
- [harness] compares the two analyses for equality and speed.

A minimal example:

```
use let_chain_analysis::chain::TaskSet;
use let_chain_analysis::task::Task;
use let_chain_analysis::time::Duration;
use let_chain_analysis::{analyze_baseline, analyze_optimized};

let tasks: TaskSet = [10, 15]
    .iter()
    .map(|&p| Task::periodic_let(Duration::from(p), Duration::zero()))
    .collect::<Result<_, _>>()
    .unwrap();
let chain = tasks.chain(&[0, 1]).unwrap();
let metrics = analyze_optimized(&chain).unwrap();
assert_eq!(metrics.mrt, Duration::from(45));
assert_eq!(metrics, analyze_baseline(&chain).unwrap());
```
*/

pub mod analysis;
pub mod chain;
pub mod harness;
pub mod job;
pub mod task;
pub mod time;

pub use analysis::{analyze_baseline, analyze_optimized, EndToEndAnalysis, Metric, Metrics};
pub use harness::{compare, compare_all, Comparison};
