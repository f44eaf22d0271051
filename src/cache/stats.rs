//! Cache Statistics Module
//!
//! Tracks cache counters with atomics so snapshots never wait on the store lock.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Live counters owned by a `CacheStore`.
///
/// `requests` is always incremented before `misses`, and snapshots load
/// `misses` before `requests`, so every snapshot satisfies `misses <= requests`.
#[derive(Debug, Default)]
pub struct CacheStats {
    requests: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
    entries: AtomicUsize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expirations(&self, count: u64) {
        self.expirations.fetch_add(count, Ordering::Relaxed);
    }

    /// Publishes the current number of stored entries.
    pub fn set_entries(&self, count: usize) {
        self.entries.store(count, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Reads all counters without touching cache state.
    pub fn snapshot(&self, capacity: usize) -> StatsSnapshot {
        let miss_count = self.misses.load(Ordering::SeqCst);
        let request_count = self.requests.load(Ordering::SeqCst);

        StatsSnapshot {
            request_count,
            miss_count,
            hit_count: request_count - miss_count,
            eviction_count: self.evictions.load(Ordering::Relaxed),
            expired_count: self.expirations.load(Ordering::Relaxed),
            entries: self.entries.load(Ordering::Relaxed),
            capacity,
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time copy of the cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Every `get`, hit or miss
    pub request_count: u64,
    /// `get` calls that found no live entry
    pub miss_count: u64,
    pub hit_count: u64,
    /// Entries removed by the eviction policy
    pub eviction_count: u64,
    /// Entries removed because their TTL elapsed
    pub expired_count: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns hits / requests, or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.request_count == 0 {
            0.0
        } else {
            self.hit_count as f64 / self.request_count as f64
        }
    }
}
