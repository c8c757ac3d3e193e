//! Cache Entry Module
//!
//! A cached value stamped with its insertion time.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value together with the moment it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the value was stored
    pub inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: V) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// An entry is readable only while `now - inserted_at < ttl`, so an entry
    /// whose age equals the TTL exactly is already expired.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }

    /// Time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }
}
