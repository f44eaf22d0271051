//! Response models for the demo service API
//!
//! Defines the DTOs serialized into HTTP response bodies.

pub mod responses;

pub use responses::{ErrorResponse, HealthResponse, StatsResponse, HELLO_WORLD};
