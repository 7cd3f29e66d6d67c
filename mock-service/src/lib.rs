//! Stand-in for the link-lookup service under test. Serves the two
//! scenario paths with DB-like and cache-like service times.

use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{debug_handler, Json, Router};
use metrics::counter;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::debug;

const AUTH_TOKEN: &str = "CHANGEME";

// Service times roughly matching the real backends: tens of milliseconds
// for the DB lookup, low single digits for the cache hit.
const DB_MEAN_MS: f64 = 18.0;
const DB_STD_MS: f64 = 4.0;
const REDIS_MEAN_MS: f64 = 2.0;
const REDIS_STD_MS: f64 = 0.5;

#[derive(Deserialize)]
pub struct LookupRequest {
    pub original_url: String,
}

#[derive(Serialize)]
pub struct ShortLink {
    pub original_url: String,
    pub short_code: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/links/by_long", post(by_long))
        .route("/api/links/redis", post(redis_cache))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(addr: SocketAddr) {
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    serve(listener).await;
}

pub async fn serve(listener: tokio::net::TcpListener) {
    axum::serve(listener, router()).await.unwrap();
}

#[debug_handler]
async fn by_long(
    headers: HeaderMap,
    Json(req): Json<LookupRequest>,
) -> Result<Json<ShortLink>, StatusCode> {
    authorize(&headers)?;
    counter!("mock-service.db_lookups").increment(1);
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);

    tokio::time::sleep(service_time(DB_MEAN_MS, DB_STD_MS)).await;
    Ok(Json(lookup(req)))
}

#[debug_handler]
async fn redis_cache(
    headers: HeaderMap,
    Json(req): Json<LookupRequest>,
) -> Result<Json<ShortLink>, StatusCode> {
    authorize(&headers)?;
    counter!("mock-service.cache_lookups").increment(1);
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);

    tokio::time::sleep(service_time(REDIS_MEAN_MS, REDIS_STD_MS)).await;
    Ok(Json(lookup(req)))
}

fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let token = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if token == Some(AUTH_TOKEN) {
        Ok(())
    } else {
        debug!("rejecting request with bad authorization");
        Err(StatusCode::UNAUTHORIZED)
    }
}

fn lookup(req: LookupRequest) -> ShortLink {
    let id = req.original_url.rsplit('/').next().unwrap_or("0");
    ShortLink {
        short_code: format!("s{id}"),
        original_url: req.original_url,
    }
}

fn service_time(mean_ms: f64, std_ms: f64) -> Duration {
    let normal = Normal::new(mean_ms, std_ms).unwrap();
    let sampled: f64 = normal.sample(&mut rand::thread_rng()).max(0.0);
    Duration::from_secs_f64(sampled / 1_000.0)
}

/** TPS Printer **/

static TPS_MEASURE: AtomicU64 = AtomicU64::new(0);

pub async fn tps_measure_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let transactions = TPS_MEASURE.fetch_min(0, Ordering::Relaxed);
        println!("{transactions} TPS");
    }
}
