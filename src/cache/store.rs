//! Cache Store Module
//!
//! The eviction core for one namespace: HashMap storage combined with O(1)
//! LRU tracking and lazy TTL expiration.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats, LruList};

// == Cache Store ==
/// Bounded key/value storage with LRU eviction and lazy TTL expiry.
///
/// Values are stored by move and returned by clone; callers cannot mutate a
/// stored value in place. Expired entries are discarded only when an operation
/// touches them; there is no background sweep inside the store itself.
///
/// The store holds `size <= capacity` at all times: eviction happens before
/// an insertion that would exceed capacity.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency tracker
    lru: LruList,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of live entries
    capacity: usize,
    /// Default TTL in seconds for entries without an explicit TTL
    default_ttl_secs: u64,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new store for `namespace`.
    ///
    /// # Panics
    /// Panics if `capacity` is zero; configuration is validated at
    /// `create_cache` time, so reaching this is a programming error.
    pub fn new(namespace: impl Into<String>, capacity: usize, default_ttl_secs: u64) -> Self {
        assert!(capacity > 0, "cache capacity must be greater than zero");
        Self {
            entries: HashMap::new(),
            lru: LruList::new(),
            stats: CacheStats::new(namespace, capacity),
            capacity,
            default_ttl_secs,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A live entry counts as a hit and becomes most recently used. An absent
    /// key counts as a miss. An expired entry is removed, counted as both a
    /// miss and an expired removal, and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let is_expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if is_expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expired_removal();
            self.stats.record_miss();
            self.stats.set_size(self.entries.len());
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.touch();
        let value = entry.value.clone();
        self.stats.record_hit();
        self.lru.touch(key);
        Some(value)
    }

    // == Set ==
    /// Stores a key-value pair with an optional TTL override in seconds.
    ///
    /// Overwriting an existing key replaces value and expiry and bumps
    /// recency without touching the hit/miss counters. Inserting a new key at
    /// capacity evicts the least recently used entry first.
    pub fn set(&mut self, key: String, value: V, ttl_secs: Option<u64>) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        let effective_ttl = ttl_secs.unwrap_or(self.default_ttl_secs);
        let entry = CacheEntry::new(value, effective_ttl);
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
        self.stats.set_size(self.entries.len());
    }

    // == Has ==
    /// Expiry-aware existence probe.
    ///
    /// Does not alter recency order and counts neither a hit nor a miss, so
    /// probing never perturbs eviction behavior. An expired entry found here
    /// is still removed and counted as an expired removal.
    pub fn has(&mut self, key: &str) -> bool {
        let is_expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return false,
        };

        if is_expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expired_removal();
            self.stats.set_size(self.entries.len());
            return false;
        }
        true
    }

    // == Delete ==
    /// Removes an entry by key; returns whether a removal occurred.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            self.stats.set_size(self.entries.len());
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes all entries and resets every counter to zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.reset();
    }

    // == Sweep Expired ==
    /// Removes all expired entries, returning how many were dropped.
    ///
    /// Counts expired removals exactly like the lazy path; misses are not
    /// affected since no lookup was issued.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expired_removal();
        }

        self.stats.set_size(self.entries.len());
        expired_keys.len()
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The maximum number of live entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
