//! LRU List Module
//!
//! Recency ordering used by each segment of the eviction policy.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == LRU List ==
/// Tracks access order for one policy segment.
///
/// Every push or refresh stamps the key with a fresh tick. The smallest tick is
/// the least recently used key, so ties never occur and insertion order breaks
/// them implicitly.
#[derive(Debug)]
pub struct LruList<K> {
    /// Current tick per key
    ticks: HashMap<K, u64>,
    /// Keys ordered by tick, oldest first
    order: BTreeMap<u64, K>,
    next_tick: u64,
}

impl<K> Default for LruList<K> {
    fn default() -> Self {
        Self {
            ticks: HashMap::new(),
            order: BTreeMap::new(),
            next_tick: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> LruList<K> {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }

    // == Push ==
    /// Inserts a key as most recently used, moving it if already present.
    pub fn push(&mut self, key: K) {
        let tick = self.tick();
        if let Some(previous) = self.ticks.insert(key.clone(), tick) {
            self.order.remove(&previous);
        }
        self.order.insert(tick, key);
    }

    // == Refresh ==
    /// Marks an existing key as most recently used.
    ///
    /// Returns false if the key is not tracked.
    pub fn refresh<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let tick = self.next_tick;
        let Some(slot) = self.ticks.get_mut(key) else {
            return false;
        };
        let previous = std::mem::replace(slot, tick);
        self.next_tick += 1;

        if let Some(owned) = self.order.remove(&previous) {
            self.order.insert(tick, owned);
        }
        true
    }

    // == Remove ==
    /// Removes a key, returning the owned key if it was tracked.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let tick = self.ticks.remove(key)?;
        self.order.remove(&tick)
    }

    // == Pop LRU ==
    /// Returns and removes the least recently used key.
    pub fn pop_lru(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    // == Peek LRU ==
    /// Returns the least recently used key without removing it.
    pub fn peek_lru(&self) -> Option<&K> {
        self.order.first_key_value().map(|(_, key)| key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ticks.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru: LruList<String> = LruList::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert!(lru.peek_lru().is_none());
    }

    #[test]
    fn test_push_orders_by_insertion() {
        let mut lru = LruList::new();

        lru.push("key1");
        lru.push("key2");
        lru.push("key3");

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_lru(), Some(&"key1"));
    }

    #[test]
    fn test_push_existing_key_moves_it() {
        let mut lru = LruList::new();

        lru.push("key1");
        lru.push("key2");
        lru.push("key1");

        assert_eq!(lru.len(), 2);
        assert_eq!(lru.pop_lru(), Some("key2"));
        assert_eq!(lru.pop_lru(), Some("key1"));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_refresh_by_borrowed_key() {
        let mut lru: LruList<String> = LruList::new();

        lru.push("a".to_string());
        lru.push("b".to_string());
        lru.push("c".to_string());

        assert!(lru.refresh("a"));
        assert!(!lru.refresh("missing"));

        assert_eq!(lru.pop_lru().as_deref(), Some("b"));
        assert_eq!(lru.pop_lru().as_deref(), Some("c"));
        assert_eq!(lru.pop_lru().as_deref(), Some("a"));
    }

    #[test]
    fn test_remove() {
        let mut lru: LruList<String> = LruList::new();

        lru.push("key1".to_string());
        lru.push("key2".to_string());
        lru.push("key3".to_string());

        assert_eq!(lru.remove("key2").as_deref(), Some("key2"));
        assert_eq!(lru.remove("nonexistent"), None);

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains("key2"));
        assert!(lru.contains("key1"));
        assert!(lru.contains("key3"));
    }

    #[test]
    fn test_pop_empty() {
        let mut lru: LruList<u32> = LruList::new();
        assert_eq!(lru.pop_lru(), None);
    }

    #[test]
    fn test_order_after_multiple_refreshes() {
        let mut lru = LruList::new();

        lru.push("a");
        lru.push("b");
        lru.push("c");

        lru.refresh("a");
        lru.refresh("c");
        lru.refresh("b");

        assert_eq!(lru.pop_lru(), Some("a"));
        assert_eq!(lru.pop_lru(), Some("c"));
        assert_eq!(lru.pop_lru(), Some("b"));
    }
}
