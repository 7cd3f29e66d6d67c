use crate::{
    DEFAULT_DOMAIN_SIZE, DEFAULT_ITERATIONS, DEFAULT_REQUEST_TIMEOUT, DEFAULT_THINK_TIME,
    DEFAULT_WORKERS,
};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("scenario `{0}` must run at least one worker")]
    NoWorkers(String),

    #[error("scenario `{0}` must run at least one iteration per worker")]
    NoIterations(String),

    #[error("identifier domain must not be empty")]
    EmptyDomain,

    #[error("target base URL must not be empty")]
    EmptyBaseUrl,
}

/// Connection settings shared by every scenario in a run.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub base_url: String,
    pub auth_token: String,
    /// Upper bound of the identifier space request URLs are drawn from.
    pub domain_size: u32,
    pub request_timeout: Duration,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://web:8080/api/links".to_string(),
            auth_token: "CHANGEME".to_string(),
            domain_size: DEFAULT_DOMAIN_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl TargetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.domain_size == 0 {
            return Err(ConfigError::EmptyDomain);
        }
        Ok(())
    }
}

/// Advisory latency gates carried alongside a scenario.
///
/// These are never evaluated by the harness itself; an external runner
/// compares them against the reported p90/p95 values.
#[derive(Debug, Clone, Copy)]
pub struct LatencyThresholds {
    pub p90: Duration,
    pub p95: Duration,
}

/// One workload definition: which path to hit, with how many workers, for
/// how many iterations each.
#[derive(Debug, Clone)]
pub struct ScenarioSpec {
    pub name: String,
    pub target_path: String,
    pub workers: usize,
    pub iterations: usize,
    /// Pause between consecutive iterations of a single worker. Models
    /// client pacing rather than a raw saturation test.
    pub think_time: Duration,
    pub thresholds: LatencyThresholds,
    pub summary_path: PathBuf,
}

impl ScenarioSpec {
    /// The direct-database lookup workload.
    pub fn db_only() -> Self {
        Self {
            name: "db_only".to_string(),
            target_path: "/by_long".to_string(),
            workers: DEFAULT_WORKERS,
            iterations: DEFAULT_ITERATIONS,
            think_time: DEFAULT_THINK_TIME,
            thresholds: LatencyThresholds {
                p90: Duration::from_millis(200),
                p95: Duration::from_millis(250),
            },
            summary_path: PathBuf::from("/results/db_only_summary.csv"),
        }
    }

    /// The cache-accelerated lookup workload.
    pub fn redis_cache() -> Self {
        Self {
            name: "redis_cache".to_string(),
            target_path: "/redis".to_string(),
            workers: DEFAULT_WORKERS,
            iterations: DEFAULT_ITERATIONS,
            think_time: DEFAULT_THINK_TIME,
            thresholds: LatencyThresholds {
                p90: Duration::from_millis(50),
                p95: Duration::from_millis(100),
            },
            summary_path: PathBuf::from("/results/redis_only_summary.csv"),
        }
    }

    /// Total number of invocations a full run of this scenario issues.
    pub fn total_requests(&self) -> usize {
        self.workers * self.iterations
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers(self.name.clone()));
        }
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations(self.name.clone()));
        }
        Ok(())
    }
}
