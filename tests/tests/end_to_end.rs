mod utils;
#[allow(unused)]
use utils::*;

use linkload::prelude::*;
use std::sync::Arc;

#[tokio::test]
async fn db_scenario_spends_the_full_iteration_budget() -> anyhow::Result<()> {
    init();
    let addr = start_mock().await;
    let target = target_for(addr);

    let spec = shrink(ScenarioSpec::db_only(), 4, 25);
    let invoker = Arc::new(HttpInvoker::new(&target)?);
    let collector = Arc::new(MetricCollector::new());
    run_scenario(&spec, &target, invoker, Arc::clone(&collector)).await?;

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.count, 100);
    assert_eq!(snapshot.checks_failed, 0);
    assert!(snapshot.average_ms.unwrap() > 0.0);
    assert!(snapshot.p95_ms.unwrap() >= snapshot.median_ms.unwrap());
    Ok(())
}

#[tokio::test]
async fn rejected_requests_never_abort_the_run() -> anyhow::Result<()> {
    init();
    let addr = start_mock().await;
    let mut target = target_for(addr);
    target.auth_token = "WRONG".to_string();

    let spec = shrink(ScenarioSpec::redis_cache(), 4, 25);
    let invoker = Arc::new(HttpInvoker::new(&target)?);
    let collector = Arc::new(MetricCollector::new());
    run_scenario(&spec, &target, invoker, Arc::clone(&collector)).await?;

    // Every check fails with a 401, but each invocation still completes
    // and contributes a latency sample.
    let snapshot = collector.snapshot();
    assert_eq!(snapshot.count, 100);
    assert_eq!(snapshot.checks_failed, 100);
    assert_eq!(snapshot.checks_passed, 0);
    assert!(snapshot.median_ms.is_some());
    Ok(())
}

#[tokio::test]
async fn comparison_report_shows_the_cache_path_faster() -> anyhow::Result<()> {
    init();
    let addr = start_mock().await;
    let target = target_for(addr);
    let invoker = Arc::new(HttpInvoker::new(&target)?);

    let db_collector = Arc::new(MetricCollector::new());
    let spec = shrink(ScenarioSpec::db_only(), 4, 10);
    run_scenario(&spec, &target, Arc::clone(&invoker), Arc::clone(&db_collector)).await?;

    let redis_collector = Arc::new(MetricCollector::new());
    let spec = shrink(ScenarioSpec::redis_cache(), 4, 10);
    run_scenario(&spec, &target, invoker, Arc::clone(&redis_collector)).await?;

    let rows = report::comparison_rows(&db_collector.snapshot(), &redis_collector.snapshot());
    let csv = report::format_csv(&rows);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], report::REPORT_HEADER);

    // Avg Latency row: the diff column is populated and positive, since
    // the mock's cache path is an order of magnitude faster.
    let diff_cell = lines[2].split(',').nth(3).unwrap();
    let diff: f64 = diff_cell.parse()?;
    assert!(diff > 0.0, "expected the cache path to be faster, diff was {diff}");

    // The count row keeps its placeholder diff.
    assert_eq!(lines[1].split(',').nth(3).unwrap(), "-");
    Ok(())
}

#[tokio::test]
async fn summary_artifact_matches_the_console_output() -> anyhow::Result<()> {
    init();
    let addr = start_mock().await;
    let target = target_for(addr);

    let spec = shrink(ScenarioSpec::db_only(), 2, 10);
    let invoker = Arc::new(HttpInvoker::new(&target)?);
    let collector = Arc::new(MetricCollector::new());
    run_scenario(&spec, &target, invoker, Arc::clone(&collector)).await?;

    let csv = report::format_csv(&report::summary_rows(Column::DbOnly, &collector.snapshot()));
    let path = std::env::temp_dir().join(format!("linkload-e2e-{}.csv", std::process::id()));
    let mut console = Vec::new();
    report::write_report(&csv, &mut console, &path)?;

    let written = std::fs::read(&path)?;
    std::fs::remove_file(&path)?;
    assert_eq!(console, written);
    assert_eq!(csv.lines().count(), 6);
    assert!(csv.contains("Total User Requests,20,-,-,"));
    Ok(())
}
