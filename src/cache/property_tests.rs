//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's invariants over arbitrary operation
//! sequences.

use proptest::prelude::*;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_CAPACITY: usize = 8;
const LONG_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Small key space so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-p]{1,2}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32, ttl_ms: u64 },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), any::<u32>(), prop_oneof![Just(0u64), Just(300_000u64)])
            .prop_map(|(key, value, ttl_ms)| CacheOp::Set { key, value, ttl_ms }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // The store never holds more than its capacity, whatever the operation mix.
    #[test]
    fn prop_capacity_enforcement(ops in prop::collection::vec(cache_op_strategy(), 1..300)) {
        let store = CacheStore::new(TEST_CAPACITY).unwrap();

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl_ms } => {
                    store.set(key, value, Duration::from_millis(ttl_ms));
                }
                CacheOp::Get { key } => {
                    store.get(&key);
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
            }
            prop_assert!(
                store.len() <= TEST_CAPACITY,
                "Cache size {} exceeds capacity {}",
                store.len(),
                TEST_CAPACITY
            );
            prop_assert_eq!(store.stats().entries, store.len());
        }
    }

    // Requests count every get, misses count every empty get, and the miss count
    // never overtakes the request count.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..100)) {
        let store = CacheStore::new(TEST_CAPACITY).unwrap();
        let mut expected_requests: u64 = 0;
        let mut expected_misses: u64 = 0;

        let initial = store.stats();
        prop_assert_eq!(initial.request_count, 0);
        prop_assert_eq!(initial.miss_count, 0);

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl_ms } => {
                    store.set(key, value, Duration::from_millis(ttl_ms));
                }
                CacheOp::Get { key } => {
                    expected_requests += 1;
                    if store.get(&key).is_none() {
                        expected_misses += 1;
                    }
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
            }

            let stats = store.stats();
            prop_assert!(stats.miss_count <= stats.request_count);
        }

        let stats = store.stats();
        prop_assert_eq!(stats.request_count, expected_requests, "Requests mismatch");
        prop_assert_eq!(stats.miss_count, expected_misses, "Misses mismatch");
    }

    // A zero TTL is already expired: the value is never observable.
    #[test]
    fn prop_zero_ttl_never_readable(key in key_strategy(), value in any::<u32>()) {
        let store = CacheStore::new(TEST_CAPACITY).unwrap();

        store.set(key.clone(), value, Duration::ZERO);

        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.stats().miss_count, 1);
    }

    // Setting the same key, value and TTL twice is observably the same as once.
    #[test]
    fn prop_set_is_idempotent(
        prefill in prop::collection::vec(key_strategy(), 0..6),
        key in key_strategy(),
        value in any::<u32>()
    ) {
        let once = CacheStore::new(TEST_CAPACITY).unwrap();
        let twice = CacheStore::new(TEST_CAPACITY).unwrap();
        for k in &prefill {
            once.set(k.clone(), 0, LONG_TTL);
            twice.set(k.clone(), 0, LONG_TTL);
        }

        once.set(key.clone(), value, LONG_TTL);
        twice.set(key.clone(), value, LONG_TTL);
        twice.set(key.clone(), value, LONG_TTL);

        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(once.get(&key), Some(value));
        prop_assert_eq!(twice.get(&key), Some(value));
        for k in &prefill {
            prop_assert_eq!(once.contains_key(k), twice.contains_key(k));
        }
    }

    // A key read often survives a scan of keys that are each written once.
    #[test]
    fn prop_frequent_key_survives_scan(reads in 3usize..10, scan in 10usize..60) {
        let store = CacheStore::new(10).unwrap();

        store.set("hot".to_string(), 1u32, LONG_TTL);
        for _ in 0..reads {
            prop_assert_eq!(store.get("hot"), Some(1));
        }

        for i in 0..scan {
            store.set(format!("scan-{i}"), 0, LONG_TTL);
        }

        prop_assert!(store.contains_key("hot"), "Frequently read key was evicted");
        prop_assert!(store.len() <= 10);
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // Once the TTL has elapsed a get reports absence, even without a sweep.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in any::<u32>()) {
        let store = CacheStore::new(TEST_CAPACITY).unwrap();

        store.set(key.clone(), value, Duration::from_millis(50));
        prop_assert_eq!(store.get(&key), Some(value), "Entry should exist before TTL expires");

        sleep(Duration::from_millis(80));

        prop_assert_eq!(store.get(&key), None, "Entry should not be found after TTL expires");
    }
}
