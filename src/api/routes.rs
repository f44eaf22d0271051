//! API Routes
//!
//! Configures the Axum router with all demo service endpoints.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{
    cached_result_handler, health_handler, hello_world_handler, metrics_handler, stats_handler,
    AppState,
};
use super::middleware::{count_errors, ErrorCounting};

pub const HELLO_WORLD_ROUTE: &str = "/hello-world";
pub const CACHED_RESULT_ROUTE: &str = "/cached-result";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /hello-world` - Randomized latency and failure
/// - `GET /cached-result` - Read-through cached computation
/// - `GET /stats` - Cache statistics
/// - `GET /metrics` - Current meter collection
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Error counting on the two demo routes, labeled with the unprefixed route
/// - Tracing: Logs all requests for debugging
///
/// A non-empty `root_path` other than `/` nests every route under that prefix.
pub fn create_router(state: AppState, root_path: &str) -> Router {
    let errors = Arc::clone(&state.errors);
    let counted = |route| {
        from_fn_with_state(ErrorCounting::new(Arc::clone(&errors), route), count_errors)
    };

    let routes = Router::new()
        .route(
            HELLO_WORLD_ROUTE,
            get(hello_world_handler).route_layer(counted(HELLO_WORLD_ROUTE)),
        )
        .route(
            CACHED_RESULT_ROUTE,
            get(cached_result_handler).route_layer(counted(CACHED_RESULT_ROUTE)),
        )
        .route("/stats", get(stats_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    let prefix = root_path.trim_end_matches('/');
    let app = if prefix.is_empty() {
        routes
    } else if prefix.starts_with('/') {
        Router::new().nest(prefix, routes)
    } else {
        Router::new().nest(&format!("/{prefix}"), routes)
    };

    app.layer(TraceLayer::new_for_http())
}
