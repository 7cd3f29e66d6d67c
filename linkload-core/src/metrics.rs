/// Metric names emitted through the `metrics` facade, labeled with
/// `scenario = <name>` by the executor.
pub struct StreamLabels {
    pub requests: &'static str,
    pub failed_checks: &'static str,
    pub latency: &'static str,
}

pub const STREAM_LABELS: StreamLabels = StreamLabels {
    requests: "linkload_requests",
    failed_checks: "linkload_failed_checks",
    latency: "linkload_request_latency",
};
