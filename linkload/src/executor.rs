//! Fixed worker pool: N independent workers, M iterations each, joined
//! before any statistics are read.

use crate::generator;
use crate::invoker::Invoker;
use crate::HarnessError;
use linkload_core::{MetricCollector, RequestSample, ScenarioSpec, TargetConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Runs one scenario to completion: spawns `spec.workers` workers, each
/// issuing exactly `spec.iterations` paced requests, and returns once
/// every worker has finished.
///
/// Per-iteration failures (non-2xx, transport errors) are folded into the
/// collector and never abort a worker; the only executor-level errors are
/// scenario misconfiguration and a panicked worker task.
pub async fn run_scenario<I>(
    spec: &ScenarioSpec,
    target: &TargetConfig,
    invoker: Arc<I>,
    collector: Arc<MetricCollector>,
) -> Result<(), HarnessError>
where
    I: Invoker + Send + Sync + 'static,
{
    spec.validate()?;
    target.validate()?;

    info!(
        "running scenario {}: {} workers x {} iterations against {}",
        spec.name, spec.workers, spec.iterations, spec.target_path
    );

    let mut workers: Vec<JoinHandle<()>> = Vec::with_capacity(spec.workers);
    for _ in 0..spec.workers {
        let ctx = WorkerContext {
            scenario: spec.name.clone(),
            path: spec.target_path.clone(),
            iterations: spec.iterations,
            think_time: spec.think_time,
            domain_size: target.domain_size,
        };
        workers.push(tokio::spawn(run_worker(
            ctx,
            Arc::clone(&invoker),
            Arc::clone(&collector),
        )));
    }

    // Join barrier: every worker completes before the collector is read,
    // even if one of them panicked.
    let mut failure = None;
    for handle in workers {
        if let Err(err) = handle.await {
            error!("worker task failed: {err}");
            failure.get_or_insert(err);
        }
    }

    match failure {
        Some(err) => Err(HarnessError::Worker(err)),
        None => {
            info!("scenario {} complete", spec.name);
            Ok(())
        }
    }
}

struct WorkerContext {
    scenario: String,
    path: String,
    iterations: usize,
    think_time: Duration,
    domain_size: u32,
}

async fn run_worker<I>(ctx: WorkerContext, invoker: Arc<I>, collector: Arc<MetricCollector>)
where
    I: Invoker + Send + Sync + 'static,
{
    for _ in 0..ctx.iterations {
        let url = generator::fixed_url(ctx.domain_size);
        let body = serde_json::json!({ "original_url": url }).to_string();

        match invoker.post(&ctx.path, body).await {
            Ok(outcome) => {
                let sample = RequestSample::new(outcome.status, outcome.latency);
                if !sample.check_passed() {
                    trace!("check failed with status {}", sample.status);
                }
                #[cfg(feature = "metrics")]
                emit_facade_metrics(&ctx.scenario, Some(&sample));
                collector.record(sample);
            }
            Err(err) => {
                debug!("request did not complete: {err}");
                #[cfg(feature = "metrics")]
                emit_facade_metrics(&ctx.scenario, None);
                collector.record_incomplete();
            }
        }

        // Think-time pacing between iterations; part of the workload
        // model, never skipped.
        sleep(ctx.think_time).await;
    }
}

#[cfg(feature = "metrics")]
fn emit_facade_metrics(scenario: &str, sample: Option<&RequestSample>) {
    use linkload_core::STREAM_LABELS;

    metrics::counter!(STREAM_LABELS.requests, "scenario" => scenario.to_string()).increment(1);
    match sample {
        Some(sample) => {
            if !sample.check_passed() {
                metrics::counter!(STREAM_LABELS.failed_checks, "scenario" => scenario.to_string())
                    .increment(1);
            }
            metrics::histogram!(STREAM_LABELS.latency, "scenario" => scenario.to_string())
                .record(sample.latency.as_secs_f64());
        }
        None => {
            metrics::counter!(STREAM_LABELS.failed_checks, "scenario" => scenario.to_string())
                .increment(1);
        }
    }
}
