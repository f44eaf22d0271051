//! Error types for the demo service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Cache Error ==
/// Fatal cache configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be at least one entry
    #[error("Invalid cache capacity {0}: must be greater than zero")]
    InvalidCapacity(usize),
}

// == Workload Error ==
/// Outcomes of the randomized workload simulator.
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// The simulator drew its failure outcome
    #[error("Simulated failure")]
    SimulatedFailure,

    /// The delay weights could not form a distribution
    #[error("Invalid delay distribution: {0}")]
    InvalidDistribution(#[from] rand::distr::weighted::Error),
}

// == Export Error ==
/// Failures pushing a metric batch to a collector.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Metrics request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Collector rejected metrics with status {0}")]
    Rejected(StatusCode),
}

// == App Error ==
/// Unified error type for request handling and service startup.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Workload(#[from] WorkloadError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    /// Every failure surfaces as a generic 500; the detail only goes to the log.
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");

        let body = Json(ErrorResponse::new("Internal server error"));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, AppError>;
