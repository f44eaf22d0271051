//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with W-TinyLFU eviction and TTL
//! expiration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, StatsSnapshot, TinyLfuPolicy};
use crate::error::CacheError;

// == Cache Store ==
/// Fixed-capacity, thread-safe key/value store with per-entry TTL.
///
/// All methods take `&self`; the table is guarded by a mutex that is never held
/// across an `.await`, and statistics are atomics readable without the lock.
#[derive(Debug)]
pub struct CacheStore<V> {
    inner: Mutex<StoreInner<V>>,
    stats: CacheStats,
    capacity: usize,
}

#[derive(Debug)]
struct StoreInner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    policy: TinyLfuPolicy<String>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// A capacity of zero is a configuration error.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            inner: Mutex::new(StoreInner {
                entries: HashMap::with_capacity(capacity.min(4096)),
                policy: TinyLfuPolicy::new(capacity),
            }),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Every call counts as a request; a missing or expired key also counts as a
    /// miss. Expired entries are removed on the spot. Hits update the policy but
    /// never extend the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        self.stats.record_request();

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.value.clone();
                inner.policy.record_access(key);
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.entries.remove(key);
            inner.policy.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_entries(inner.entries.len());
        }

        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores a value, expiring `ttl` from now. A zero TTL expires immediately.
    ///
    /// Overwriting an existing key replaces value and TTL and counts as an
    /// access. Inserting a new key into a full cache evicts the policy's victim.
    pub fn set(&self, key: String, value: V, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl);

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(existing) = inner.entries.get_mut(&key) {
            *existing = entry;
            inner.policy.record_access(key.as_str());
            return;
        }

        inner.entries.insert(key.clone(), entry);
        if let Some(victim) = inner.policy.admit(key) {
            inner.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(key = %victim, "Evicted cache entry");
        }

        self.stats.set_entries(inner.entries.len());
    }

    // == Delete ==
    /// Removes an entry by key. Returns true if it was present.
    pub fn delete(&self, key: &str) -> bool {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let removed = inner.entries.remove(key).is_some();
        if removed {
            inner.policy.remove(key);
            self.stats.set_entries(inner.entries.len());
        }
        removed
    }

    // == Contains Key ==
    /// Checks for a live entry without counting a request or touching the policy.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner
            .lock()
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics without taking the table lock.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.capacity)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let now = Instant::now();
        let expired_keys: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            inner.entries.remove(key);
            inner.policy.remove(key.as_str());
        }

        let count = expired_keys.len();
        self.stats.record_expirations(count as u64);
        self.stats.set_entries(inner.entries.len());
        count
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
