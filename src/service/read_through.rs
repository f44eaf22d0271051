//! Read-Through Orchestrator
//!
//! Serves values from the cache and fills it on a miss.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, field, info_span, Instrument, Span};

use crate::cache::CacheStore;
use crate::error::AppError;

/// Key under which `/cached-result` stores its value
pub const RESULT_KEY: &str = "result";

/// Value produced by the simulated computation
pub const COMPUTED_RESULT: &str = "foo";

// == Read Through ==
/// Read-through access to a shared cache with a fixed TTL for filled entries.
///
/// Concurrent misses on the same key are not coalesced: every caller that
/// misses runs its own computation and the last one to finish decides the
/// stored value and TTL.
#[derive(Debug)]
pub struct ReadThrough<V> {
    cache: Arc<CacheStore<V>>,
    ttl: Duration,
}

impl<V: Clone> ReadThrough<V> {
    pub fn new(cache: Arc<CacheStore<V>>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub fn cache(&self) -> &Arc<CacheStore<V>> {
        &self.cache
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, or runs `compute`, stores its value
    /// for the configured TTL and returns it.
    ///
    /// The miss path runs inside a `compute result` span that records elapsed
    /// time and outcome. A failed computation stores nothing. Dropping the
    /// returned future before `compute` finishes leaves the cache untouched.
    pub async fn get_or_compute<F, Fut, E>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.cache.get(key) {
            debug!(key, "Cache hit");
            return Ok(value);
        }

        let span = info_span!(
            "compute result",
            cache.key = key,
            cache.ttl_secs = self.ttl.as_secs(),
            compute.elapsed_ms = field::Empty,
            compute.outcome = field::Empty
        );

        async move {
            let started = Instant::now();
            let outcome = compute().await;

            let span = Span::current();
            span.record("compute.elapsed_ms", started.elapsed().as_millis() as u64);

            match outcome {
                Ok(value) => {
                    self.cache.set(key.to_string(), value.clone(), self.ttl);
                    span.record("compute.outcome", "stored");
                    Ok(value)
                }
                Err(err) => {
                    span.record("compute.outcome", "failed");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// The demo computation behind `/cached-result`: waits `delay`, then yields
/// `COMPUTED_RESULT`.
pub async fn simulate_computation(delay: Duration) -> Result<String, AppError> {
    tokio::time::sleep(delay).await;
    Ok(COMPUTED_RESULT.to_string())
}
