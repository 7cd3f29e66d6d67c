use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] linkload_core::ConfigError),

    #[error(transparent)]
    Invoke(#[from] crate::invoker::InvokeError),

    #[error("worker task failed: {0}")]
    Worker(#[source] tokio::task::JoinError),
}
