//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default read-through TTL in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Unparsable values fall back to the default instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen host
    pub host: String,
    /// HTTP server port
    pub port: u16,
    /// Prefix for every route when served behind a proxy, empty for none
    pub root_path: String,
    /// Maximum number of entries the cache can hold
    pub cache_capacity: usize,
    /// TTL applied to read-through results
    pub cache_ttl: Duration,
    /// Simulated work performed on a cache miss
    pub compute_delay: Duration,
    /// Background expiry sweep interval
    pub cleanup_interval: Duration,
    /// Metrics export interval
    pub metrics_interval: Duration,
    /// Collector URL for metric batches; None logs them instead
    pub metrics_endpoint: Option<String>,
    /// Service name attached to exported metrics
    pub service_name: String,
    /// Fixed seed for the workload simulator
    pub workload_seed: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` - Listen host (default: 0.0.0.0)
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `ROOT_PATH` - Route prefix (default: empty)
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 10000)
    /// - `CACHE_TTL` - Read-through TTL in seconds (default: 30, negative means 0)
    /// - `COMPUTE_DELAY_MS` - Simulated miss computation (default: 2000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep in seconds (default: 1)
    /// - `OTEL_METRIC_EXPORT_INTERVAL` - Metrics export in milliseconds (default: 60000)
    /// - `METRICS_ENDPOINT` - Collector URL (default: unset, log exporter)
    /// - `SERVICE_NAME` - Service name (default: demo-api)
    /// - `WORKLOAD_SEED` - Simulator seed (default: unset, OS entropy)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            root_path: lookup("ROOT_PATH").unwrap_or(defaults.root_path),
            cache_capacity: parse_or(&lookup, "CACHE_CAPACITY", defaults.cache_capacity),
            cache_ttl: parse_ttl(lookup("CACHE_TTL").as_deref()),
            compute_delay: Duration::from_millis(parse_or(
                &lookup,
                "COMPUTE_DELAY_MS",
                defaults.compute_delay.as_millis() as u64,
            )),
            cleanup_interval: Duration::from_secs(parse_positive_or(
                &lookup,
                "CLEANUP_INTERVAL",
                defaults.cleanup_interval.as_secs(),
            )),
            metrics_interval: Duration::from_millis(parse_positive_or(
                &lookup,
                "OTEL_METRIC_EXPORT_INTERVAL",
                defaults.metrics_interval.as_millis() as u64,
            )),
            metrics_endpoint: lookup("METRICS_ENDPOINT").filter(|v| !v.trim().is_empty()),
            service_name: lookup("SERVICE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.service_name),
            workload_seed: lookup("WORKLOAD_SEED").and_then(|v| v.trim().parse().ok()),
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Like `parse_or`, but zero also falls back; used for timer periods.
fn parse_positive_or<F>(lookup: &F, name: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match parse_or(lookup, name, default) {
        0 => default,
        value => value,
    }
}

/// Parses a TTL in whole seconds.
///
/// Absent or non-numeric input yields the 30 second default; negative input
/// means the entry is expired on arrival.
pub fn parse_ttl(raw: Option<&str>) -> Duration {
    match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(secs) if secs <= 0 => Duration::ZERO,
        Some(secs) => Duration::from_secs(secs as u64),
        None => Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            root_path: String::new(),
            cache_capacity: 10_000,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            compute_delay: Duration::from_secs(2),
            cleanup_interval: Duration::from_secs(1),
            metrics_interval: Duration::from_secs(60),
            metrics_endpoint: None,
            service_name: "demo-api".to_string(),
            workload_seed: None,
        }
    }
}
