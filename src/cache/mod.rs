//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

use std::time::Duration;

mod entry;
mod lru;
mod stats;
mod store;
mod tagged;

#[cfg(test)]
mod property_tests;

pub(crate) use entry::CacheEntry;
pub(crate) use lru::LruTracker;

// Re-export public types
pub use stats::CacheMetrics;
pub use store::LruCache;
pub use tagged::AnyLruCache;

// == Public Constants ==
/// Smallest accepted capacity; a single-slot LRU is degenerate
pub const MIN_MAX_ITEMS: usize = 2;

/// Shortest accepted non-zero TTL
pub const MIN_TTL: Duration = Duration::from_millis(10);
