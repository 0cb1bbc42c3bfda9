//! Store Contract
//!
//! The two capabilities every cache backend exposes. The orchestrator in
//! [`crate::aside`] only ever talks to a store through these traits.

use std::sync::Arc;

use crate::cache::CacheMetrics;
use crate::error::Result;

// == Cache ==
/// Keyed store for values of type `V`.
///
/// `get` must fail with [`CacheError::Miss`](crate::CacheError::Miss) when the
/// key is absent or expired, and with
/// [`CacheError::TypeMismatch`](crate::CacheError::TypeMismatch) when a live
/// entry cannot be returned as `V`. Any other error is a backend fault.
pub trait Cache<V> {
    /// Stores a copy of `value` under `key`.
    fn put(&self, key: &str, value: &V) -> Result<()>;

    /// Returns the live value stored under `key`.
    fn get(&self, key: &str) -> Result<V>;
}

// == Measurable Cache ==
/// Cache that keeps operation counters.
pub trait MeasurableCache<V>: Cache<V> {
    /// Snapshot of the counters. There is no reset.
    fn metrics(&self) -> CacheMetrics;
}

impl<V, C: Cache<V> + ?Sized> Cache<V> for Arc<C> {
    fn put(&self, key: &str, value: &V) -> Result<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<V> {
        (**self).get(key)
    }
}

impl<V, C: MeasurableCache<V> + ?Sized> MeasurableCache<V> for Arc<C> {
    fn metrics(&self) -> CacheMetrics {
        (**self).metrics()
    }
}
