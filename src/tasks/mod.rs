//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at configured intervals
//! - Metrics Export: Collects the meter and pushes it to the exporter

mod cleanup;
mod metrics;

pub use cleanup::spawn_cleanup_task;
pub use metrics::spawn_metrics_task;
