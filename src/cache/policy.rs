//! Eviction Policy Module
//!
//! W-TinyLFU: a small LRU window in front of a segmented LRU main space, with a
//! frequency sketch deciding which of two eviction candidates to keep.

use std::borrow::Borrow;
use std::hash::Hash;

use crate::cache::lru::LruList;
use crate::cache::sketch::FrequencySketch;

// == TinyLFU Policy ==
/// Decides which key leaves the cache when a new key pushes it over capacity.
///
/// New keys enter the window. When the window overflows its least recent key
/// becomes a candidate for the main space: it is admitted freely while main has
/// room, otherwise it competes with main's victim and the key with the higher
/// frequency estimate stays. On equal estimates the victim, which was inserted
/// earlier, is evicted.
#[derive(Debug)]
pub struct TinyLfuPolicy<K> {
    window: LruList<K>,
    probation: LruList<K>,
    protected: LruList<K>,
    sketch: FrequencySketch,
    window_capacity: usize,
    main_capacity: usize,
    protected_capacity: usize,
}

impl<K: Eq + Hash + Clone> TinyLfuPolicy<K> {
    // == Constructor ==
    /// Creates a policy for `capacity` keys. `capacity` must be at least 1.
    pub fn new(capacity: usize) -> Self {
        let window_capacity = ((capacity as f64 * 0.01).round() as usize).clamp(1, capacity.max(1));
        let main_capacity = capacity.saturating_sub(window_capacity);
        let protected_capacity = if main_capacity == 0 {
            0
        } else {
            let probation_capacity = ((main_capacity as f64 * 0.20).round() as usize).max(1);
            main_capacity.saturating_sub(probation_capacity)
        };

        Self {
            window: LruList::new(),
            probation: LruList::new(),
            protected: LruList::new(),
            sketch: FrequencySketch::new(capacity),
            window_capacity,
            main_capacity,
            protected_capacity,
        }
    }

    // == Record Access ==
    /// Records a read or overwrite of a key already in the cache.
    pub fn record_access<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sketch.increment(key);

        if self.window.refresh(key) || self.protected.refresh(key) {
            return;
        }

        if let Some(owned) = self.probation.remove(key) {
            self.protected.push(owned);
            while self.protected.len() > self.protected_capacity {
                match self.protected.pop_lru() {
                    Some(demoted) => self.probation.push(demoted),
                    None => break,
                }
            }
        }
    }

    // == Admit ==
    /// Tracks a newly inserted key.
    ///
    /// Returns the key that must be evicted to stay within capacity, if any.
    /// The returned key is never the one being admitted.
    pub fn admit(&mut self, key: K) -> Option<K> {
        self.sketch.increment(&key);
        self.window.push(key);

        if self.window.len() <= self.window_capacity {
            return None;
        }

        let candidate = self.window.pop_lru()?;
        self.admit_to_main(candidate)
    }

    fn admit_to_main(&mut self, candidate: K) -> Option<K> {
        if self.main_len() < self.main_capacity {
            self.probation.push(candidate);
            return None;
        }

        let victim = match self.probation.peek_lru().or_else(|| self.protected.peek_lru()) {
            Some(victim) => victim.clone(),
            None => return Some(candidate),
        };

        if self.sketch.estimate(&candidate) >= self.sketch.estimate(&victim) {
            self.remove(&victim);
            self.probation.push(candidate);
            Some(victim)
        } else {
            Some(candidate)
        }
    }

    // == Remove ==
    /// Forgets a key removed by expiry or deletion. Its frequency is kept.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.window.remove(key).is_some() {
            return;
        }
        if self.probation.remove(key).is_some() {
            return;
        }
        self.protected.remove(key);
    }

    fn main_len(&self) -> usize {
        self.probation.len() + self.protected.len()
    }

    /// Number of keys tracked across all segments.
    pub fn len(&self) -> usize {
        self.window.len() + self.main_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.window.contains(key) || self.probation.contains(key) || self.protected.contains(key)
    }
}
