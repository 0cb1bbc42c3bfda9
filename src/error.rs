//! Error types for the caching layer
//!
//! Provides unified error handling using thiserror. A cache miss is modelled
//! as an error value so every backend can report it through the same channel,
//! but callers are expected to branch on it rather than log it.

use std::error::Error as StdError;
use std::time::Duration;

use thiserror::Error;

// == Cache Miss ==
/// Signal returned when a key is absent or no longer live.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Key \"{key}\" not found in cache")]
pub struct CacheMiss {
    key: String,
}

impl CacheMiss {
    /// Builds a miss signal for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Returns the key that was not found.
    pub fn key(&self) -> &str {
        &self.key
    }
}

// == Cache Error Enum ==
/// Unified error type for cache stores.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found, or found but expired
    #[error(transparent)]
    Miss(#[from] CacheMiss),

    /// Live entry holds a value of another type than the one requested
    #[error("Unable to write {stored} into {requested}")]
    TypeMismatch { stored: String, requested: String },

    /// Store constructed with fewer than two slots
    #[error("At least 2 max items required, but {0} received")]
    InvalidCapacity(usize),

    /// Store constructed with a TTL outside the accepted range
    #[error("TTL should be {expected}, but {received:?} received")]
    InvalidTtl {
        received: Duration,
        expected: &'static str,
    },

    /// Key rejected by the backend
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by the storage behind a cache
    #[error("Backend error: {0}")]
    Backend(String),
}

impl CacheError {
    /// Shorthand for a miss on `key`.
    pub fn miss(key: impl Into<String>) -> Self {
        CacheError::Miss(CacheMiss::new(key))
    }

    /// Returns true for the miss signal and nothing else.
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::Miss(_))
    }
}

// == Miss Detection ==
/// Returns true if `err` is, or wraps, a cache miss.
///
/// The whole source chain is inspected, so a miss that travelled through
/// `anyhow` or another wrapper is still recognized. `None` is never a miss.
pub fn is_cache_miss(err: Option<&(dyn StdError + 'static)>) -> bool {
    std::iter::successors(err, |&e| e.source()).any(|e| {
        e.is::<CacheMiss>() || e.downcast_ref::<CacheError>().is_some_and(CacheError::is_miss)
    })
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
