//! Cache Module
//!
//! In-memory, fixed-capacity caching with TTL expiration and W-TinyLFU eviction.

mod entry;
mod lru;
mod policy;
mod sketch;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruList;
pub use policy::TinyLfuPolicy;
pub use sketch::FrequencySketch;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;
