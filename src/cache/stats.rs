//! Cache Statistics Module
//!
//! Tracks lookup outcomes and eviction volume for a presence cache.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing how a cache has been used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live key
    pub hits: u64,
    /// Lookups that did not find the key and recorded it
    pub misses: u64,
    /// Entries removed because they outlived the TTL
    pub evictions: u64,
    /// Empty keys passed to insert or lookup and ignored
    pub ignored_keys: u64,
    /// Live entry count at the time of the snapshot
    pub live_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Evictions ==
    /// Adds `count` to the eviction counter.
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    // == Record Ignored Key ==
    /// Increments the ignored empty key counter.
    pub fn record_ignored_key(&mut self) {
        self.ignored_keys += 1;
    }

    // == Snapshot ==
    /// Returns a copy carrying the given live entry count.
    pub fn snapshot(&self, live_entries: usize) -> Self {
        Self {
            live_entries,
            ..self.clone()
        }
    }
}
