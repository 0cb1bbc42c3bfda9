//! Heterogeneous LRU store
//!
//! Lets values of different types share one key space. Every entry remembers
//! its concrete type, and a read asking for another type is refused with
//! [`CacheError::TypeMismatch`] instead of being treated as a miss.

use std::any::{type_name, Any};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheMetrics, LruCache};
use crate::contract::{Cache, MeasurableCache};
use crate::error::{CacheError, Result};

/// Type-erased value plus the name of its type, for error messages.
#[derive(Clone)]
struct TaggedValue {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl TaggedValue {
    fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    fn downcast<T: Any + Clone>(&self) -> Result<T> {
        self.value
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| CacheError::TypeMismatch {
                stored: self.type_name.to_string(),
                requested: type_name::<T>().to_string(),
            })
    }
}

// == Any LRU Cache ==
/// [`LruCache`] that accepts any `Clone + Send + Sync` value type.
///
/// Same capacity, TTL and counting rules as [`LruCache`]. A type mismatch is
/// counted as a read of a live entry, not as a miss.
pub struct AnyLruCache {
    inner: LruCache<TaggedValue>,
}

impl AnyLruCache {
    /// See [`LruCache::new`].
    pub fn new(max_items: usize, ttl: Duration) -> Result<Self> {
        Ok(Self {
            inner: LruCache::new(max_items, ttl)?,
        })
    }

    /// See [`LruCache::without_ttl`].
    pub fn without_ttl(max_items: usize) -> Result<Self> {
        Self::new(max_items, Duration::ZERO)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.inner.metrics()
    }
}

impl std::fmt::Debug for AnyLruCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyLruCache")
            .field("len", &self.inner.len())
            .field("capacity", &self.inner.capacity())
            .field("ttl", &self.inner.ttl())
            .finish()
    }
}

impl<T: Any + Clone + Send + Sync> Cache<T> for AnyLruCache {
    fn put(&self, key: &str, value: &T) -> Result<()> {
        self.inner.insert(key, TaggedValue::new(value.clone()));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<T> {
        self.inner.read_with(key, TaggedValue::downcast::<T>)?
    }
}

impl<T: Any + Clone + Send + Sync> MeasurableCache<T> for AnyLruCache {
    fn metrics(&self) -> CacheMetrics {
        self.inner.metrics()
    }
}
