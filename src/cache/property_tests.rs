//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify correctness properties over generated operation
//! sequences. All time is driven by ManualClock, so TTL behavior is
//! deterministic and no test sleeps.

use proptest::prelude::*;

use crate::cache::{EvictionStrategy, ExpiringCache};
use crate::clock::ManualClock;
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_DEFAULT_TTL_MS: u64 = 300_000;

fn test_cache(max_size: Option<usize>) -> (ExpiringCache<String, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let config = CacheConfig {
        default_ttl_ms: TEST_DEFAULT_TTL_MS,
        max_size,
        ..Default::default()
    };
    (ExpiringCache::with_clock(config, clock.clone()), clock)
}

// == Strategies ==
/// Generates valid cache keys (non-empty, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

/// Generates cache values
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, the counters reflect exactly the
    // operations that occurred.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let (mut cache, _clock) = test_cache(None);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_gets: u64 = 0;
        let mut expected_sets: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key, value, None).unwrap();
                    expected_sets += 1;
                }
                CacheOp::Get { key } => {
                    expected_gets += 1;
                    match cache.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    let _ = cache.delete(&key);
                }
            }
        }

        let stats = cache.statistics();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_gets, expected_gets, "Total gets mismatch");
        prop_assert_eq!(stats.total_sets, expected_sets, "Total sets mismatch");
        prop_assert_eq!(stats.size, cache.len(), "Size mismatch");
    }

    // Storing a pair and retrieving it before expiry returns the stored
    // value.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in valid_value_strategy()) {
        let (mut cache, _clock) = test_cache(None);

        cache.set(key.clone(), value.clone(), None).unwrap();

        prop_assert_eq!(cache.get(&key), Some(value));
    }

    // After a delete, a lookup finds nothing.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), value in valid_value_strategy()) {
        let (mut cache, _clock) = test_cache(None);

        cache.set(key.clone(), value, None).unwrap();
        prop_assert!(cache.has(&key), "Key should exist before delete");

        prop_assert!(cache.delete(&key));
        prop_assert_eq!(cache.get(&key), None, "Key should not exist after delete");
    }

    // Storing V1 then V2 under one key leaves exactly one entry holding V2.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in valid_value_strategy(),
        value2 in valid_value_strategy()
    ) {
        let (mut cache, _clock) = test_cache(None);

        cache.set(key.clone(), value1, None).unwrap();
        cache.set(key.clone(), value2.clone(), None).unwrap();

        prop_assert_eq!(cache.get(&key), Some(value2));
        prop_assert_eq!(cache.len(), 1, "Should have exactly one entry after overwrite");
    }

    // The live entry count never exceeds max_size after any set.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec(
            (valid_key_strategy(), valid_value_strategy()),
            1..200
        )
    ) {
        let max_size = 50;
        let (mut cache, _clock) = test_cache(Some(max_size));

        for (key, value) in entries {
            cache.set(key, value, None).unwrap();
            prop_assert!(
                cache.len() <= max_size,
                "Cache size {} exceeds max {}",
                cache.len(),
                max_size
            );
        }
    }

    // An entry is gone once its TTL has strictly elapsed, and live before.
    #[test]
    fn prop_ttl_expiry(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        ttl_ms in 1u64..100_000
    ) {
        let (mut cache, clock) = test_cache(None);

        cache.set(key.clone(), value.clone(), Some(ttl_ms)).unwrap();

        clock.advance(ttl_ms);
        prop_assert!(cache.has(&key), "Entry should be live at the TTL boundary");

        clock.advance(1);
        prop_assert_eq!(cache.get(&key), None, "Entry should expire past its TTL");
    }
}

// Property tests for LRU eviction behavior
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Filling the cache to capacity and inserting once more evicts the
    // earliest-inserted key when nothing has been accessed since.
    #[test]
    fn prop_lru_evicts_oldest_untouched(
        initial_keys in prop::collection::vec(valid_key_strategy(), 3..10),
        new_key in valid_key_strategy(),
        new_value in valid_value_strategy()
    ) {
        let unique_keys: Vec<String> = initial_keys
            .into_iter()
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let (mut cache, clock) = test_cache(Some(capacity));

        let oldest_key = unique_keys[0].clone();
        for key in &unique_keys {
            cache.set(key.clone(), format!("value_{}", key), None).unwrap();
            clock.advance(1);
        }

        prop_assert_eq!(cache.len(), capacity);

        cache.set(new_key.clone(), new_value, None).unwrap();

        prop_assert_eq!(cache.len(), capacity, "Cache should remain at capacity");
        prop_assert!(!cache.has(&oldest_key), "Oldest key should have been evicted");
        prop_assert!(cache.has(&new_key), "New key should exist");

        for key in unique_keys.iter().skip(1) {
            prop_assert!(cache.has(key), "Key '{}' should still exist", key);
        }
    }

    // A key read just before the cache overflows is never the victim; the
    // next-least-recently-accessed key is.
    #[test]
    fn prop_lru_access_protects_key(
        keys in prop::collection::vec(valid_key_strategy(), 3..8),
        new_key in valid_key_strategy(),
        new_value in valid_value_strategy()
    ) {
        let unique_keys: Vec<String> = keys
            .into_iter()
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 3);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let (mut cache, clock) = test_cache(Some(capacity));

        for key in &unique_keys {
            cache.set(key.clone(), format!("value_{}", key), None).unwrap();
            clock.advance(1);
        }

        // Reading the first key refreshes its recency
        let accessed_key = unique_keys[0].clone();
        cache.get(&accessed_key);
        clock.advance(1);

        let expected_victim = unique_keys[1].clone();
        cache.set(new_key.clone(), new_value, None).unwrap();

        prop_assert!(cache.has(&accessed_key), "Accessed key must not be evicted");
        prop_assert!(!cache.has(&expected_victim), "Next-oldest key should be the victim");
        prop_assert!(cache.has(&new_key), "New key should exist");
    }

    // Under LFU, the least-read entry is always the victim.
    #[test]
    fn prop_lfu_evicts_least_read(
        hot_reads in 2u8..6,
    ) {
        let clock = ManualClock::new();
        let config = CacheConfig {
            eviction_strategy: EvictionStrategy::Lfu,
            max_size: Some(2),
            ..Default::default()
        };
        let mut cache: ExpiringCache<String, ManualClock> =
            ExpiringCache::with_clock(config, clock.clone());

        cache.set("hot", "h".to_string(), None).unwrap();
        cache.set("cold", "c".to_string(), None).unwrap();
        clock.advance(1);

        for _ in 0..hot_reads {
            cache.get("hot");
            clock.advance(1);
        }
        cache.get("cold");
        clock.advance(1);

        cache.set("fresh", "f".to_string(), None).unwrap();

        prop_assert!(cache.has("hot"));
        prop_assert!(!cache.has("cold"));
        prop_assert!(cache.has("fresh"));
    }
}
