use std::time::{Duration, Instant};

/// Logs the time spent since `last` and returns the new running total.
pub(crate) fn trace(l_step: &str, detect: Instant, last: Duration) -> Duration {
    let total = detect.elapsed();
    log::trace!("TIME | Total={:.2?} | {}={:.2?}", total, l_step, total.saturating_sub(last));
    total
}
