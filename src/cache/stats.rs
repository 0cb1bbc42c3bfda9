//! Cache Metrics Module
//!
//! Operation counters kept by measurable stores.

use serde::Serialize;

// == Cache Metrics ==
/// Counters for a store's lifetime. They only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheMetrics {
    /// Number of put calls
    pub put: u64,
    /// Number of get calls
    pub get: u64,
    /// Number of get calls that found nothing live (absent or expired)
    pub miss: u64,
    /// Number of get calls that found an entry past its deadline
    pub expired: u64,
}

impl CacheMetrics {
    // == Constructor ==
    /// Creates a new CacheMetrics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns (get - miss) / get, or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.get == 0 {
            0.0
        } else {
            self.hits() as f64 / self.get as f64
        }
    }

    /// Number of get calls that found a live entry.
    pub fn hits(&self) -> u64 {
        self.get.saturating_sub(self.miss)
    }

    pub fn record_put(&mut self) {
        self.put += 1;
    }

    pub fn record_get(&mut self) {
        self.get += 1;
    }

    pub fn record_miss(&mut self) {
        self.miss += 1;
    }

    // == Record Expired ==
    /// Counts a read that found an expired entry. Such a read is a miss too.
    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.miss += 1;
    }
}
