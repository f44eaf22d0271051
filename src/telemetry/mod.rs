//! Telemetry Module
//!
//! Tracing subscriber setup, the in-process metric registry and its exporters.

mod cache_metrics;
mod exporter;
mod metrics;

pub use cache_metrics::{register_cache_metrics, CACHE_MISS_METRIC, CACHE_REQUEST_METRIC};
pub use exporter::{Exporter, MetricBatch};
pub use metrics::{Attributes, Counter, Meter, MetricKind, MetricPoint};

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter,
};

/// Counter incremented once per failed request
pub const ERRORS_METRIC: &str = "errors";

/// Attribute naming the matched route on request metrics
pub const ROUTE_ATTRIBUTE: &str = "http.route";

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "demo_api=info,loadgen=info,tower_http=info";

/// Installs the global tracing subscriber.
///
/// Span close events are logged so every span's busy/idle time and recorded
/// fields reach the output. Defaults to `DEFAULT_LOG_FILTER`, overridable with
/// the `RUST_LOG` env var.
pub fn init_tracing() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_span_events(FmtSpan::CLOSE))
        .try_init()
}
