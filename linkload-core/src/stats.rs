use std::time::Duration;

/// Aggregate statistics for one metric stream, frozen at report time.
///
/// Latency fields are `None` when no samples were recorded; they are never
/// substituted with a zero that could be mistaken for a measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    /// Number of latency samples folded into the stream.
    pub count: u64,
    pub checks_passed: u64,
    pub checks_failed: u64,
    pub average_ms: Option<f64>,
    pub median_ms: Option<f64>,
    pub p90_ms: Option<f64>,
    pub p95_ms: Option<f64>,
}

impl MetricSnapshot {
    /// Derives the snapshot from a sorted sample set.
    pub(crate) fn compute(sorted: &[Duration], checks_passed: u64, checks_failed: u64) -> Self {
        let average_ms = if sorted.is_empty() {
            None
        } else {
            let millis: Vec<f64> = sorted.iter().map(as_millis).collect();
            Some(statistical::mean(&millis))
        };

        Self {
            count: sorted.len() as u64,
            checks_passed,
            checks_failed,
            average_ms,
            median_ms: nearest_rank(sorted, 0.50).map(|d| as_millis(&d)),
            p90_ms: nearest_rank(sorted, 0.90).map(|d| as_millis(&d)),
            p95_ms: nearest_rank(sorted, 0.95).map(|d| as_millis(&d)),
        }
    }

    /// An empty stream, useful for rendering a scenario that never ran.
    pub fn empty() -> Self {
        Self::compute(&[], 0, 0)
    }

    /// Fraction of checks that passed, if any invocation was attempted.
    pub fn check_pass_rate(&self) -> Option<f64> {
        let attempts = self.checks_passed + self.checks_failed;
        if attempts == 0 {
            None
        } else {
            Some(self.checks_passed as f64 / attempts as f64)
        }
    }
}

fn as_millis(latency: &Duration) -> f64 {
    latency.as_nanos() as f64 / 1e6
}

/// Nearest-rank selection with a floor tie-break: the value at zero-based
/// index `floor(q * (n - 1))` of the sorted samples. The same rule is used
/// for the median, p90 and p95 so the three are mutually consistent.
fn nearest_rank(sorted: &[Duration], quantile: f64) -> Option<Duration> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (sorted.len() - 1) as f64 * quantile;
    sorted.get(rank.floor() as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(values: &[u64]) -> Vec<Duration> {
        values.iter().map(|ms| Duration::from_millis(*ms)).collect()
    }

    #[test]
    fn reference_sample_set() {
        let sorted = millis(&[10, 20, 30, 40, 50]);
        let snapshot = MetricSnapshot::compute(&sorted, 5, 0);

        assert_eq!(snapshot.count, 5);
        assert_eq!(snapshot.average_ms, Some(30.0));
        assert_eq!(snapshot.median_ms, Some(30.0));
        // floor(0.90 * 4) = 3 and floor(0.95 * 4) = 3, both index 40ms.
        assert_eq!(snapshot.p90_ms, Some(40.0));
        assert_eq!(snapshot.p95_ms, Some(40.0));
    }

    #[test]
    fn empty_stream_reports_unavailable() {
        let snapshot = MetricSnapshot::empty();
        assert_eq!(snapshot.count, 0);
        assert_eq!(snapshot.average_ms, None);
        assert_eq!(snapshot.median_ms, None);
        assert_eq!(snapshot.p90_ms, None);
        assert_eq!(snapshot.p95_ms, None);
        assert_eq!(snapshot.check_pass_rate(), None);
    }

    #[test]
    fn single_sample_is_every_percentile() {
        let sorted = millis(&[42]);
        let snapshot = MetricSnapshot::compute(&sorted, 1, 0);
        assert_eq!(snapshot.average_ms, Some(42.0));
        assert_eq!(snapshot.median_ms, Some(42.0));
        assert_eq!(snapshot.p90_ms, Some(42.0));
        assert_eq!(snapshot.p95_ms, Some(42.0));
    }

    #[test]
    fn percentiles_use_the_floor_rank() {
        // With 10 samples, p90 sits at floor(0.9 * 9) = index 8 and the
        // median at floor(0.5 * 9) = index 4.
        let sorted = millis(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let snapshot = MetricSnapshot::compute(&sorted, 10, 0);
        assert_eq!(snapshot.median_ms, Some(5.0));
        assert_eq!(snapshot.p90_ms, Some(9.0));
        assert_eq!(snapshot.p95_ms, Some(9.0));
    }

    #[test]
    fn pass_rate_reflects_failed_checks() {
        let sorted = millis(&[5, 5, 5, 5]);
        let snapshot = MetricSnapshot::compute(&sorted, 3, 1);
        assert_eq!(snapshot.check_pass_rate(), Some(0.75));
    }
}
