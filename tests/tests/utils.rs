use linkload::prelude::*;
use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();
    ONCE_LOCK.get_or_init(|| {
        let _ = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Binds the mock link service on an ephemeral port and serves it in the
/// background for the lifetime of the test process.
#[allow(unused)]
pub async fn start_mock() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_service::serve(listener).await });
    addr
}

#[allow(unused)]
pub fn target_for(addr: SocketAddr) -> TargetConfig {
    TargetConfig {
        base_url: format!("http://{addr}/api/links"),
        auth_token: "CHANGEME".to_string(),
        domain_size: 500,
        request_timeout: Duration::from_secs(5),
    }
}

/// Shrinks a named scenario down to a test-sized workload.
#[allow(unused)]
pub fn shrink(mut spec: ScenarioSpec, workers: usize, iterations: usize) -> ScenarioSpec {
    spec.workers = workers;
    spec.iterations = iterations;
    spec.think_time = Duration::from_millis(1);
    spec
}
