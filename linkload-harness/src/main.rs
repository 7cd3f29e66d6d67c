use anyhow::Context;
use linkload::prelude::*;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

const COMPARISON_PATH: &str = "/results/comparison_summary.csv";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("linkload=info,linkload_harness=info")
        .init();

    if let Err(err) = PrometheusBuilder::new()
        .with_http_listener("0.0.0.0:8002".parse::<SocketAddr>().unwrap())
        .install()
    {
        warn!("metrics exporter unavailable, continuing without it: {err}");
    }

    let target = TargetConfig::default();
    let invoker = Arc::new(HttpInvoker::new(&target).context("failed to build HTTP invoker")?);

    let mut snapshots = Vec::new();
    let scenarios = [
        (ScenarioSpec::db_only(), Column::DbOnly, "DB-ONLY"),
        (ScenarioSpec::redis_cache(), Column::RedisCache, "REDIS-ONLY"),
    ];

    for (spec, column, banner) in scenarios {
        let collector = Arc::new(MetricCollector::new());
        run_scenario(&spec, &target, Arc::clone(&invoker), Arc::clone(&collector))
            .await
            .with_context(|| format!("scenario {} failed", spec.name))?;

        let snapshot = collector.snapshot();
        if let Some(rate) = snapshot.check_pass_rate() {
            info!(
                "scenario {}: {} samples, {:.1}% checks passed",
                spec.name,
                snapshot.count,
                rate * 100.0
            );
        }

        let csv = report::format_csv(&report::summary_rows(column, &snapshot));
        println!("\n===== {banner} PERFORMANCE SUMMARY (CSV) =====\n");
        report::write_report(&csv, &mut std::io::stdout(), &spec.summary_path)
            .with_context(|| format!("failed to deliver the {} summary", spec.name))?;
        println!();

        snapshots.push(snapshot);
    }

    let csv = report::format_csv(&report::comparison_rows(&snapshots[0], &snapshots[1]));
    println!("\n===== DB VS REDIS COMPARISON (CSV) =====\n");
    report::write_report(&csv, &mut std::io::stdout(), Path::new(COMPARISON_PATH))
        .context("failed to deliver the comparison summary")?;
    println!();

    Ok(())
}
