//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against its capacity, recency and
//! counting rules.

use proptest::prelude::*;
use std::collections::HashSet;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::LruCache;
use crate::contract::Cache;

// == Test Configuration ==
const TEST_MAX_ITEMS: usize = 100;

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

/// Deduplicates keys while keeping first-seen order
fn unique(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

/// Straightforward LRU model: index 0 is the least recently used key
#[derive(Debug, Default)]
struct Model {
    order: Vec<(String, String)>,
    capacity: usize,
}

impl Model {
    fn put(&mut self, key: &str, value: &str) {
        if let Some(pos) = self.order.iter().position(|(k, _)| k == key) {
            self.order.remove(pos);
        } else if self.order.len() >= self.capacity {
            self.order.remove(0);
        }
        self.order.push((key.to_string(), value.to_string()));
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let pos = self.order.iter().position(|(k, _)| k == key)?;
        let entry = self.order.remove(pos);
        let value = entry.1.clone();
        self.order.push(entry);
        Some(value)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations the store answers exactly like a
    // textbook LRU of the same capacity, and its counters match.
    #[test]
    fn prop_matches_reference_model(
        capacity in 2usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let store = LruCache::without_ttl(capacity).unwrap();
        let mut model = Model { capacity, ..Model::default() };
        let (mut puts, mut gets, mut misses) = (0u64, 0u64, 0u64);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(&key, &value).unwrap();
                    model.put(&key, &value);
                    puts += 1;
                }
                CacheOp::Get { key } => {
                    gets += 1;
                    match (store.get(&key), model.get(&key)) {
                        (Ok(got), Some(expected)) => prop_assert_eq!(got, expected),
                        (Err(err), None) => {
                            prop_assert!(err.is_miss());
                            misses += 1;
                        }
                        (got, expected) => prop_assert!(
                            false,
                            "store returned {:?}, model expected {:?}",
                            got.map_err(|e| e.to_string()),
                            expected
                        ),
                    }
                }
            }
            prop_assert_eq!(store.len(), model.order.len());
        }

        let metrics = store.metrics();
        prop_assert_eq!(metrics.put, puts);
        prop_assert_eq!(metrics.get, gets);
        prop_assert_eq!(metrics.miss, misses);
        prop_assert_eq!(metrics.expired, 0);
    }

    // Storing a pair and reading it back returns the same value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let store = LruCache::without_ttl(TEST_MAX_ITEMS).unwrap();

        store.put(&key, &value).unwrap();

        prop_assert_eq!(store.get(&key).unwrap(), value);
    }

    // A second put under the same key replaces the first.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let store = LruCache::without_ttl(TEST_MAX_ITEMS).unwrap();

        store.put(&key, &value1).unwrap();
        store.put(&key, &value2).unwrap();

        prop_assert_eq!(store.get(&key).unwrap(), value2);
        prop_assert_eq!(store.len(), 1);
    }

    // The number of resident entries never exceeds the capacity.
    #[test]
    fn prop_capacity_enforcement(
        max_items in 2usize..20,
        entries in prop::collection::vec((value_strategy(), value_strategy()), 1..200)
    ) {
        let store = LruCache::without_ttl(max_items).unwrap();

        for (key, value) in entries {
            store.put(&key, &value).unwrap();
            prop_assert!(
                store.len() <= max_items,
                "Cache size {} exceeds max {}",
                store.len(),
                max_items
            );
        }
    }

    // Filling the store and adding one more key evicts exactly the first key.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::vec(value_strategy(), 2..10),
        new_key in value_strategy()
    ) {
        let keys = unique(initial_keys);
        prop_assume!(keys.len() >= 2);
        prop_assume!(!keys.contains(&new_key));

        let capacity = keys.len();
        let store = LruCache::without_ttl(capacity).unwrap();
        for key in &keys {
            store.put(key, &format!("value_{}", key)).unwrap();
        }

        store.put(&new_key, &"new".to_string()).unwrap();

        prop_assert_eq!(store.len(), capacity);
        prop_assert!(store.get(&keys[0]).unwrap_err().is_miss());
        prop_assert!(store.get(&new_key).is_ok());
        for key in keys.iter().skip(1) {
            prop_assert!(store.get(key).is_ok(), "Key '{}' should still exist", key);
        }
    }

    // Reading the oldest key protects it; the next oldest goes instead.
    #[test]
    fn prop_lru_access_tracking(
        initial_keys in prop::collection::vec(value_strategy(), 3..8),
        new_key in value_strategy()
    ) {
        let keys = unique(initial_keys);
        prop_assume!(keys.len() >= 3);
        prop_assume!(!keys.contains(&new_key));

        let store = LruCache::without_ttl(keys.len()).unwrap();
        for key in &keys {
            store.put(key, &format!("value_{}", key)).unwrap();
        }

        store.get(&keys[0]).unwrap();
        store.put(&new_key, &"new".to_string()).unwrap();

        prop_assert!(store.get(&keys[0]).is_ok());
        prop_assert!(store.get(&keys[1]).unwrap_err().is_miss());
        prop_assert!(store.get(&new_key).is_ok());
    }
}

// Separate block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // Entries are readable before their TTL and a miss after it.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in value_strategy()) {
        let store = LruCache::new(TEST_MAX_ITEMS, Duration::from_millis(20)).unwrap();

        store.put(&key, &value).unwrap();
        prop_assert_eq!(store.get(&key).unwrap(), value);

        sleep(Duration::from_millis(25));

        prop_assert!(store.get(&key).unwrap_err().is_miss());
        let metrics = store.metrics();
        prop_assert_eq!(metrics.expired, 1);
        prop_assert_eq!(metrics.miss, 1);
    }
}
