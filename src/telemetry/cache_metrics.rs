//! Cache instrumentation.
//!
//! Exposes the cache's request and miss totals as observable counters. The
//! callbacks only read `CacheStore::stats`, so sampling never mutates or blocks
//! the cache.

use std::sync::Arc;

use crate::cache::CacheStore;
use crate::telemetry::Meter;

pub const CACHE_REQUEST_METRIC: &str = "cache.request";
pub const CACHE_MISS_METRIC: &str = "cache.miss";

/// Registers `cache.request` and `cache.miss` on `meter` for `cache`.
///
/// Both report 0 until the cache serves its first request. Combined, they give
/// the miss ratio.
pub fn register_cache_metrics<V>(meter: &Meter, cache: Arc<CacheStore<V>>)
where
    V: Clone + Send + 'static,
{
    let requests = Arc::clone(&cache);
    meter.create_observable_counter(
        CACHE_REQUEST_METRIC,
        "Total cache lookups",
        "1",
        move || requests.stats().request_count,
    );

    meter.create_observable_counter(
        CACHE_MISS_METRIC,
        "Cache lookups that found no live entry",
        "1",
        move || cache.stats().miss_count,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn value_of(meter: &Meter, name: &str) -> u64 {
        meter
            .collect()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
            .unwrap()
    }

    #[test]
    fn test_reports_zero_before_any_request() {
        let meter = Meter::new();
        let cache = Arc::new(CacheStore::<String>::new(10).unwrap());
        register_cache_metrics(&meter, cache);

        assert_eq!(value_of(&meter, CACHE_REQUEST_METRIC), 0);
        assert_eq!(value_of(&meter, CACHE_MISS_METRIC), 0);
    }

    #[test]
    fn test_reports_cache_totals() {
        let meter = Meter::new();
        let cache = Arc::new(CacheStore::new(10).unwrap());
        register_cache_metrics(&meter, Arc::clone(&cache));

        cache.get("result");
        cache.set("result".to_string(), "foo".to_string(), Duration::from_secs(30));
        cache.get("result");
        cache.get("result");

        assert_eq!(value_of(&meter, CACHE_REQUEST_METRIC), 3);
        assert_eq!(value_of(&meter, CACHE_MISS_METRIC), 1);
    }

    #[test]
    fn test_sampling_does_not_touch_cache() {
        let meter = Meter::new();
        let cache = Arc::new(CacheStore::<u32>::new(10).unwrap());
        register_cache_metrics(&meter, Arc::clone(&cache));

        for _ in 0..5 {
            meter.collect();
        }

        let stats = cache.stats();
        assert_eq!(stats.request_count, 0);
        assert_eq!(stats.entries, 0);
    }
}
