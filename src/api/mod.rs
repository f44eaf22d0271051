//! API Module
//!
//! HTTP handlers, middleware and routing for the demo service.
//!
//! # Endpoints
//! - `GET /hello-world` - Randomized latency and failure
//! - `GET /cached-result` - Read-through cached computation
//! - `GET /stats` - Get cache statistics
//! - `GET /metrics` - Current metric values
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::{count_errors, ErrorCounting};
pub use routes::{create_router, CACHED_RESULT_ROUTE, HELLO_WORLD_ROUTE};
