//! TTL Cache Store
//!
//! String-keyed map of values that expire a fixed time after insertion,
//! bounded by a maximum entry count.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, RecencyTracker};

// == TTL Cache ==
/// Process-local cache with a single TTL shared by every entry.
///
/// Expired entries are dropped eagerly when read and in bulk by
/// [`TtlCache::cleanup_expired`]. When the cache is full, inserting a new key
/// evicts the least recently used one.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    recency: RecencyTracker,
    stats: CacheStats,
    ttl: Duration,
    max_entries: usize,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `ttl` - How long an entry stays readable after `set`
    /// * `max_entries` - Capacity; at least one entry is always allowed
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyTracker::new(),
            stats: CacheStats::new(),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and restarting
    /// its TTL.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.recency.pop_least_recent() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value));
        self.recency.touch(&key);
        debug_assert_eq!(self.recency.len(), self.entries.len());
    }

    // == Get ==
    /// Returns a copy of the value if present and unexpired.
    ///
    /// An expired entry is removed by the lookup that finds it.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.ttl),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.recency.forget(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.recency.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Invalidate ==
    /// Removes `key`, or every entry when `key` is `None`.
    pub fn invalidate(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.entries.remove(key);
                self.recency.forget(key);
            }
            None => {
                self.entries.clear();
                self.recency.clear();
            }
        }
    }

    // == Cleanup Expired ==
    /// Removes every expired entry and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.recency.forget(key);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hit_rate: self.stats.hit_rate(),
            ..self.stats.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
