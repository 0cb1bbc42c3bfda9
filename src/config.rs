//! Configuration Module
//!
//! Sizing for in-memory stores, loadable from environment variables or from
//! any serde-supported config format.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{AnyLruCache, LruCache};
use crate::error::Result;

/// Prefix used by [`CacheConfig::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "CACHE";

/// Store sizing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the store can hold
    pub max_items: usize,
    /// Entry lifetime in milliseconds, 0 = no expiry
    pub ttl_ms: u64,
}

impl CacheConfig {
    /// Loads `CACHE_MAX_ITEMS` and `CACHE_TTL_MS`.
    pub fn from_env() -> Self {
        Self::from_env_prefixed(DEFAULT_ENV_PREFIX)
    }

    /// Loads `<PREFIX>_MAX_ITEMS` and `<PREFIX>_TTL_MS`, e.g. `NEAR_MAX_ITEMS`
    /// for the near tier of a two-level setup.
    ///
    /// Missing or unparsable values fall back to the defaults (1000 items,
    /// no TTL).
    pub fn from_env_prefixed(prefix: &str) -> Self {
        let defaults = Self::default();

        Self {
            max_items: env::var(format!("{}_MAX_ITEMS", prefix))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_items),
            ttl_ms: env::var(format!("{}_TTL_MS", prefix))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_ms),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Builds a typed store; validation is the store constructor's.
    pub fn build<V>(&self) -> Result<LruCache<V>> {
        LruCache::new(self.max_items, self.ttl())
    }

    /// Builds a heterogeneous store.
    pub fn build_any(&self) -> Result<AnyLruCache> {
        AnyLruCache::new(self.max_items, self.ttl())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_items: 1000,
            ttl_ms: 0,
        }
    }
}
