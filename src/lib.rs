//! Cache Aside - a pluggable caching layer
//!
//! Provides a bounded in-memory store with LRU eviction and TTL expiry, a
//! JSON-serializing store over pluggable row storage, and cache-aside helpers
//! that put any of them in front of a value-producing operation, including a
//! two-tier near/far variant with promotion.

pub mod aside;
pub mod cache;
pub mod config;
pub mod contract;
pub mod error;
pub mod serialized;

pub use aside::{with_cache, with_double_cache, InPlace, Produce};
pub use cache::{AnyLruCache, CacheMetrics, LruCache};
pub use config::CacheConfig;
pub use contract::{Cache, MeasurableCache};
pub use error::{is_cache_miss, CacheError, CacheMiss, Result};
pub use serialized::{MemoryRowStore, Row, RowStore, SerializedCache};
