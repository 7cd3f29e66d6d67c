use linkload_core::TargetConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("failed to construct HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request did not complete: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result of one completed request/response cycle.
///
/// A non-2xx status is a completed outcome, not an error; [`InvokeError`]
/// is reserved for transport failures where no response was obtained.
#[derive(Debug, Clone, Copy)]
pub struct InvokeOutcome {
    pub status: u16,
    pub latency: Duration,
}

/// One request/response cycle against a scenario path.
#[trait_variant::make(Invoker: Send)]
pub trait LocalInvoker {
    type Error: std::fmt::Display + Send;

    async fn post(&self, path: &str, body: String) -> Result<InvokeOutcome, Self::Error>;
}

/// Reqwest-backed invoker targeting `base_url + path` with the fixed
/// authorization and content-type headers.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: Client,
    base_url: String,
    auth_token: String,
}

impl HttpInvoker {
    pub fn new(target: &TargetConfig) -> Result<Self, InvokeError> {
        let client = Client::builder()
            .timeout(target.request_timeout)
            .build()
            .map_err(InvokeError::Client)?;

        Ok(Self {
            client,
            base_url: target.base_url.trim_end_matches('/').to_string(),
            auth_token: target.auth_token.clone(),
        })
    }
}

impl Invoker for HttpInvoker {
    type Error = InvokeError;

    /// Measures wall-clock time of the full cycle, including draining the
    /// response body.
    async fn post(&self, path: &str, body: String) -> Result<InvokeOutcome, InvokeError> {
        let url = format!("{}{}", self.base_url, path);

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.auth_token.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let _ = response.bytes().await?;
        let latency = start.elapsed();

        Ok(InvokeOutcome { status, latency })
    }
}
