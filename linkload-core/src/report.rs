//! Fixed-schema CSV rendering of one or two metric snapshots.
//!
//! The table shape never changes: one header line plus five data rows, with
//! `-` standing in for any cell the run cannot fill. This keeps single-
//! scenario and combined reports column-compatible.

use crate::MetricSnapshot;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const REPORT_HEADER: &str = "Metric,DB-only,Redis Cache,Diff (% faster),Description";

const PLACEHOLDER: &str = "-";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write summary artifact `{path}`: {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write summary to console sink: {0}")]
    Console(#[source] io::Error),
}

/// Which column of the fixed table a single-scenario snapshot occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    DbOnly,
    RedisCache,
}

impl Column {
    fn run_label(&self) -> &'static str {
        match self {
            Column::DbOnly => "DB-only",
            Column::RedisCache => "Redis-only",
        }
    }
}

/// One rendered data row; every cell is already a string so formatting
/// stays a pure transform over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub metric: String,
    pub db_only: String,
    pub redis_cache: String,
    pub diff: String,
    pub description: String,
}

/// Rows for a report covering a single scenario. The opposite column and
/// the diff column hold placeholders.
pub fn summary_rows(column: Column, snapshot: &MetricSnapshot) -> Vec<ReportRow> {
    let label = column.run_label();
    metric_cells(snapshot)
        .into_iter()
        .map(|(metric, value, description)| {
            let (db_only, redis_cache) = match column {
                Column::DbOnly => (value, PLACEHOLDER.to_string()),
                Column::RedisCache => (PLACEHOLDER.to_string(), value),
            };
            ReportRow {
                metric: metric.to_string(),
                db_only,
                redis_cache,
                diff: PLACEHOLDER.to_string(),
                description: format!("{description} ({label} run)"),
            }
        })
        .collect()
}

/// Rows for the combined report. The diff column is populated for the
/// latency rows as the percentage by which the cache path beat the DB
/// path.
pub fn comparison_rows(db: &MetricSnapshot, redis: &MetricSnapshot) -> Vec<ReportRow> {
    let db_cells = metric_cells(db);
    let redis_cells = metric_cells(redis);
    let diffs = [
        None,
        percent_faster(db.average_ms, redis.average_ms),
        percent_faster(db.median_ms, redis.median_ms),
        percent_faster(db.p90_ms, redis.p90_ms),
        percent_faster(db.p95_ms, redis.p95_ms),
    ];

    db_cells
        .into_iter()
        .zip(redis_cells)
        .zip(diffs)
        .map(|(((metric, db_value, description), (_, redis_value, _)), diff)| ReportRow {
            metric: metric.to_string(),
            db_only: db_value,
            redis_cache: redis_value,
            diff: diff.map_or_else(|| PLACEHOLDER.to_string(), |pct| format!("{pct:.2}")),
            description: description.to_string(),
        })
        .collect()
}

/// Renders the fixed table: header plus one line per row, no trailing
/// newline. Deterministic for a given input.
pub fn format_csv(rows: &[ReportRow]) -> String {
    let mut lines = vec![REPORT_HEADER.to_string()];
    lines.extend(rows.iter().map(|row| {
        format!(
            "{},{},{},{},{}",
            row.metric, row.db_only, row.redis_cache, row.diff, row.description
        )
    }));
    lines.join("\n")
}

/// Delivers the formatted artifact to both sinks with identical bytes.
///
/// The file write goes through a temp file and rename so a failure never
/// leaves a truncated CSV at the destination.
pub fn write_report(csv: &str, console: &mut dyn io::Write, path: &Path) -> Result<(), ReportError> {
    console
        .write_all(csv.as_bytes())
        .and_then(|_| console.flush())
        .map_err(ReportError::Console)?;

    let file_err = |source: io::Error| ReportError::File {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(file_err)?;
        }
    }
    let tmp = path.with_extension("csv.tmp");
    fs::write(&tmp, csv).map_err(file_err)?;
    fs::rename(&tmp, path).map_err(file_err)?;

    debug!("wrote summary artifact to {}", path.display());
    Ok(())
}

/// The five fixed metrics as (label, rendered value, base description).
fn metric_cells(snapshot: &MetricSnapshot) -> [(&'static str, String, &'static str); 5] {
    [
        (
            "Total User Requests",
            snapshot.count.to_string(),
            "Total number of requests",
        ),
        (
            "Avg Latency (ms)",
            fmt_latency(snapshot.average_ms),
            "Average time per request",
        ),
        (
            "Median Latency (ms)",
            fmt_latency(snapshot.median_ms),
            "Median time per request",
        ),
        (
            "p(90) Latency (ms)",
            fmt_latency(snapshot.p90_ms),
            "90th percentile latency",
        ),
        (
            "p(95) Latency (ms)",
            fmt_latency(snapshot.p95_ms),
            "95th percentile latency",
        ),
    ]
}

fn fmt_latency(value: Option<f64>) -> String {
    match value {
        Some(ms) => format!("{ms:.2}"),
        None => "N/A".to_string(),
    }
}

fn percent_faster(db_ms: Option<f64>, redis_ms: Option<f64>) -> Option<f64> {
    match (db_ms, redis_ms) {
        (Some(db), Some(redis)) if db > 0.0 => Some((db - redis) / db * 100.0),
        _ => None,
    }
}
