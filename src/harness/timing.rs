//! Wall-clock measurement of analysis runs.

use std::time::{Duration, Instant};

/// Run `f` `repetitions` times (at least once) and return the result
/// of the last run together with the shortest observed wall-clock time.
pub fn min_wall_time<T, F>(repetitions: usize, mut f: F) -> (T, Duration)
where
    F: FnMut() -> T,
{
    let start = Instant::now();
    let mut last = f();
    let mut fastest = start.elapsed();
    for _ in 1..repetitions {
        let start = Instant::now();
        last = f();
        fastest = fastest.min(start.elapsed());
    }
    (last, fastest)
}
