//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheMetrics, LruTracker, MIN_MAX_ITEMS, MIN_TTL};
use crate::contract::{Cache, MeasurableCache};
use crate::error::{CacheError, Result};

/// Everything guarded by the store lock.
#[derive(Debug)]
struct State<V> {
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
    metrics: CacheMetrics,
}

// == LRU Cache ==
/// Bounded in-memory store with LRU eviction and an optional uniform TTL.
///
/// All state sits behind a single mutex; each `get`, `put` and `metrics` call
/// holds it for its whole critical section.
#[derive(Debug)]
pub struct LruCache<V> {
    state: Mutex<State<V>>,
    max_items: usize,
    ttl: Duration,
}

impl<V> LruCache<V> {
    // == Constructor ==
    /// Creates a store holding at most `max_items` entries, each living `ttl`.
    ///
    /// A zero `ttl` disables expiry. Fails when `max_items < 2` or when `ttl`
    /// is non-zero but shorter than 10ms.
    pub fn new(max_items: usize, ttl: Duration) -> Result<Self> {
        if max_items < MIN_MAX_ITEMS {
            return Err(CacheError::InvalidCapacity(max_items));
        }
        if !ttl.is_zero() && ttl < MIN_TTL {
            return Err(CacheError::InvalidTtl {
                received: ttl,
                expected: "zero or at least 10ms",
            });
        }

        Ok(Self {
            state: Mutex::new(State {
                entries: HashMap::new(),
                lru: LruTracker::new(),
                metrics: CacheMetrics::new(),
            }),
            max_items,
            ttl,
        })
    }

    /// Creates a store whose entries never expire.
    pub fn without_ttl(max_items: usize) -> Result<Self> {
        Self::new(max_items, Duration::ZERO)
    }

    /// Stores an already owned value.
    pub fn insert(&self, key: &str, value: V) {
        let mut state = self.state.lock();

        if !state.entries.contains_key(key) && state.entries.len() >= self.max_items {
            if let Some(evicted) = state.lru.evict_oldest() {
                state.entries.remove(&evicted);
                debug!("LRU eviction: key '{}' evicted to admit '{}'", evicted, key);
            }
        }

        state
            .entries
            .insert(key.to_string(), CacheEntry::new(value, self.ttl));
        state.lru.touch(key);
        state.metrics.record_put();
    }

    /// Looks up a live entry and maps it while the lock is held.
    ///
    /// Handles the shared bookkeeping of a read: counters, lazy expiry and
    /// the recency touch.
    pub(crate) fn read_with<T>(&self, key: &str, f: impl FnOnce(&V) -> T) -> Result<T> {
        let mut state = self.state.lock();
        state.metrics.record_get();

        let expired = match state.entries.get(key) {
            None => {
                state.metrics.record_miss();
                trace!("Cache miss for key '{}'", key);
                return Err(CacheError::miss(key));
            }
            Some(entry) => entry.is_expired_at(Instant::now()),
        };

        if expired {
            state.entries.remove(key);
            state.lru.remove(key);
            state.metrics.record_expired();
            debug!("Entry for key '{}' expired, removed on read", key);
            return Err(CacheError::miss(key));
        }

        state.lru.touch(key);
        match state.entries.get(key) {
            Some(entry) => Ok(f(&entry.value)),
            None => Err(CacheError::miss(key)),
        }
    }

    // == Length ==
    /// Returns the number of resident entries, expired ones included.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.max_items
    }

    /// Lifetime given to every entry; zero means no expiry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Snapshot of the operation counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.state.lock().metrics
    }
}

impl<V: Clone> Cache<V> for LruCache<V> {
    fn put(&self, key: &str, value: &V) -> Result<()> {
        self.insert(key, value.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<V> {
        self.read_with(key, V::clone)
    }
}

impl<V: Clone> MeasurableCache<V> for LruCache<V> {
    fn metrics(&self) -> CacheMetrics {
        LruCache::metrics(self)
    }
}
