//! Demo API - an observable demo service
//!
//! Serves a randomly slow, occasionally failing endpoint and a read-through
//! cached endpoint backed by a TTL cache with W-TinyLFU eviction. Requests are
//! traced and the cache is exposed through periodically exported metrics.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod loadgen;
pub mod models;
pub mod service;
pub mod tasks;
pub mod telemetry;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::{spawn_cleanup_task, spawn_metrics_task};
