//! API Handlers
//!
//! HTTP request handlers for each demo service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, StatsResponse, HELLO_WORLD};
use crate::service::{simulate_computation, ReadThrough, WorkloadSimulator, RESULT_KEY};
use crate::telemetry::{register_cache_metrics, Counter, Meter, MetricPoint, ERRORS_METRIC};

/// Application state shared across all handlers.
///
/// Everything is behind an `Arc`; the cache and the meter synchronize
/// internally, so handlers never take a lock of their own.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheStore<String>>,
    pub read_through: Arc<ReadThrough<String>>,
    pub workload: Arc<WorkloadSimulator>,
    pub meter: Arc<Meter>,
    /// Failed requests per route, incremented by `count_errors`
    pub errors: Arc<Counter>,
    /// Simulated work performed by `/cached-result` on a miss
    pub compute_delay: Duration,
}

impl AppState {
    /// Creates a new AppState from configuration.
    ///
    /// Registers the cache instruments and the `errors` counter on a fresh
    /// meter. Fails on a zero cache capacity.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Arc::new(CacheStore::new(config.cache_capacity)?);
        let workload = match config.workload_seed {
            Some(seed) => WorkloadSimulator::seeded(seed)?,
            None => WorkloadSimulator::new()?,
        };

        let meter = Arc::new(Meter::new());
        register_cache_metrics(&meter, Arc::clone(&cache));
        let errors = meter.create_counter(ERRORS_METRIC, "Counts the number of errors", "1");

        Ok(Self {
            read_through: Arc::new(ReadThrough::new(Arc::clone(&cache), config.cache_ttl)),
            cache,
            workload: Arc::new(workload),
            meter,
            errors,
            compute_delay: config.compute_delay,
        })
    }
}

/// Handler for GET /hello-world
///
/// Sleeps for a randomly drawn delay and fails one time in ten.
pub async fn hello_world_handler(State(state): State<AppState>) -> Result<Json<&'static str>> {
    state.workload.simulate_work().await?;
    Ok(Json(HELLO_WORLD))
}

/// Handler for GET /cached-result
///
/// Serves the cached result, computing it first on a miss.
pub async fn cached_result_handler(State(state): State<AppState>) -> Result<Json<String>> {
    let delay = state.compute_delay;
    let value = state
        .read_through
        .get_or_compute(RESULT_KEY, || simulate_computation(delay))
        .await?;

    Ok(Json(value))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /metrics
///
/// Collects the meter on demand, the same data the export task pushes.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<Vec<MetricPoint>> {
    Json(state.meter.collect())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
