//! Request Middleware
//!
//! Counts failed requests per route on the shared `errors` counter.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::telemetry::{Counter, ROUTE_ATTRIBUTE};

/// State for `count_errors`: the counter and the route label it records.
///
/// The label is fixed per route, so it stays the same when the router is
/// nested under a prefix.
#[derive(Debug, Clone)]
pub struct ErrorCounting {
    errors: Arc<Counter>,
    route: &'static str,
}

impl ErrorCounting {
    pub fn new(errors: Arc<Counter>, route: &'static str) -> Self {
        Self { errors, route }
    }
}

/// Increments `errors` once for every 5xx response, labeled with the route.
/// The response itself passes through untouched.
pub async fn count_errors(
    State(counting): State<ErrorCounting>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if response.status().is_server_error() {
        counting.errors.add(1, &[(ROUTE_ATTRIBUTE, counting.route)]);
    }
    response
}
