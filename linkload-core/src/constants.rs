use std::time::Duration;

/// Number of virtual users per scenario.
pub const DEFAULT_WORKERS: usize = 10;

/// Iterations each worker performs before stopping.
pub const DEFAULT_ITERATIONS: usize = 5_000;

/// Per-worker pause between iterations.
pub const DEFAULT_THINK_TIME: Duration = Duration::from_millis(10);

/// Size of the fixed identifier space request URLs are drawn from.
pub const DEFAULT_DOMAIN_SIZE: u32 = 50_000;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
