//! Cache Statistics Module
//!
//! Tracks per-namespace cache performance metrics: hits, misses, expired
//! removals, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Performance counters for one cache namespace.
///
/// Counters increase monotonically for the instance's lifetime and are reset
/// only by an explicit `clear()`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Namespace this snapshot belongs to
    pub namespace: String,
    /// Current number of live entries
    pub size: usize,
    /// Maximum number of entries the namespace can hold
    pub capacity: usize,
    /// Number of `get` calls that returned a live value
    pub hits: u64,
    /// Number of `get` calls that returned absent (missing or expired)
    pub misses: u64,
    /// Number of entries removed because their TTL had elapsed
    pub expired_removals: u64,
    /// Number of entries evicted by the LRU policy
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates zeroed counters for a namespace.
    pub fn new(namespace: impl Into<String>, capacity: usize) -> Self {
        Self {
            namespace: namespace.into(),
            capacity,
            ..Default::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no `get` calls were recorded.
    ///
    /// The 0.0 sentinel for the no-traffic case is part of the contract and is
    /// pinned by tests.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expired Removal ==
    pub fn record_expired_removal(&mut self) {
        self.expired_removals += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Size ==
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    // == Reset ==
    /// Zeroes all counters; namespace and capacity are preserved.
    pub fn reset(&mut self) {
        self.size = 0;
        self.hits = 0;
        self.misses = 0;
        self.expired_removals = 0;
        self.evictions = 0;
    }
}
