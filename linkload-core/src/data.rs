use crate::stats::MetricSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// One completed request/response cycle.
#[derive(Debug, Clone, Copy)]
pub struct RequestSample {
    pub status: u16,
    pub latency: Duration,
}

impl RequestSample {
    pub fn new(status: u16, latency: Duration) -> Self {
        Self { status, latency }
    }

    /// The scenarios treat any 2xx response as a passed check.
    pub fn check_passed(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Accumulates latency samples and check results for one metric stream.
///
/// All mutation goes through [`record`](Self::record) and
/// [`record_incomplete`](Self::record_incomplete), which are safe to call
/// concurrently from any worker. The full sample set is retained: the
/// workload bounds it to `workers * iterations` entries, small enough to
/// keep exact percentiles instead of a sketch.
#[derive(Debug, Default)]
pub struct MetricCollector {
    latencies: Mutex<Vec<Duration>>,
    checks_passed: AtomicU64,
    checks_failed: AtomicU64,
}

impl MetricCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one completed invocation into the stream.
    pub fn record(&self, sample: RequestSample) {
        if sample.check_passed() {
            self.checks_passed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.checks_failed.fetch_add(1, Ordering::Relaxed);
        }

        let mut latencies = match self.latencies.lock() {
            Ok(guard) => guard,
            // A worker panicked mid-push; the vec itself is still intact.
            Err(poisoned) => poisoned.into_inner(),
        };
        latencies.push(sample.latency);
    }

    /// Records an invocation that never completed (connect failure,
    /// timeout). Counts as a failed check with no latency sample.
    pub fn record_incomplete(&self) {
        self.checks_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Computes the aggregate statistics over everything recorded so far.
    ///
    /// Intended to be called once recording is complete; the result is
    /// order-independent with respect to how samples were interleaved.
    pub fn snapshot(&self) -> MetricSnapshot {
        let mut latencies = match self.latencies.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        latencies.sort_unstable();

        MetricSnapshot::compute(
            &latencies,
            self.checks_passed.load(Ordering::Relaxed),
            self.checks_failed.load(Ordering::Relaxed),
        )
    }
}
