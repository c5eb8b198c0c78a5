//! Map-Backed Cache Module
//!
//! Stores key → first-seen time in a HashMap. Lookups are O(1) on average,
//! but every eviction pass walks the whole table since expired entries can
//! sit anywhere in it.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, trace};

use crate::cache::backend::ttl_from_secs;
use crate::cache::entry::is_expired;
use crate::cache::{CacheStats, Clock, Lookup, SystemClock, TimeCache};
use crate::error::Result;

// == Map Cache ==
/// Presence cache over a hash map of key to insertion time.
#[derive(Debug)]
pub struct MapCache<C: Clock = SystemClock> {
    /// Key to insertion time
    entries: HashMap<String, DateTime<Utc>>,
    /// Lifetime of an entry
    ttl: TimeDelta,
    /// Tracked number of stored entries
    count: usize,
    stats: CacheStats,
    clock: C,
}

impl MapCache<SystemClock> {
    // == Constructor ==
    /// Creates an empty cache whose entries live for `ttl_secs` seconds.
    pub fn new(ttl_secs: u64) -> Result<Self> {
        Self::with_clock(ttl_secs, SystemClock)
    }
}

impl<C: Clock> MapCache<C> {
    /// Creates an empty cache that reads time from `clock`.
    pub fn with_clock(ttl_secs: u64, clock: C) -> Result<Self> {
        Ok(Self {
            entries: HashMap::new(),
            ttl: ttl_from_secs(ttl_secs)?,
            count: 0,
            stats: CacheStats::new(),
            clock,
        })
    }

    /// Returns the recorded insertion time of `key` without evicting or
    /// inserting anything. Expired but not yet evicted keys are returned too.
    pub fn peek(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).copied()
    }

    // Overwrites an existing timestamp rather than storing a second copy
    fn put(&mut self, key: &str, now: DateTime<Utc>) {
        if self.entries.insert(key.to_string(), now).is_none() {
            self.count += 1;
        }
    }

    fn evict_at(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, inserted_at| !is_expired(*inserted_at, now, ttl));

        let removed = before - self.entries.len();
        if removed > 0 {
            self.count -= removed;
            self.stats.record_evictions(removed);
            debug!(removed, remaining = self.count, "Evicted expired entries");
        }
        removed
    }

    fn ignore_empty_key(&mut self) {
        self.stats.record_ignored_key();
        debug!("Ignoring empty key");
    }
}

impl<C: Clock> TimeCache for MapCache<C> {
    fn contains(&mut self, key: &str) -> Lookup {
        let now = self.clock.now();
        if key.is_empty() {
            self.ignore_empty_key();
            return Lookup::miss(now);
        }

        self.evict_at(now);

        if self.count > 0 {
            if let Some(inserted_at) = self.entries.get(key).copied() {
                self.stats.record_hit();
                trace!(key, "Map cache hit");
                return Lookup::hit(inserted_at);
            }
        }

        self.put(key, now);
        self.stats.record_miss();
        trace!(key, "Map cache miss");
        Lookup::miss(now)
    }

    fn insert(&mut self, key: &str) {
        if key.is_empty() {
            self.ignore_empty_key();
            return;
        }
        let now = self.clock.now();
        self.put(key, now);
    }

    fn evict_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.evict_at(now)
    }

    fn len(&self) -> usize {
        self.count
    }

    fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.count)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::CacheError;

    fn cache_with_clock(ttl_secs: u64) -> (MapCache<ManualClock>, ManualClock) {
        let clock = ManualClock::starting_now();
        let cache = MapCache::with_clock(ttl_secs, clock.clone()).unwrap();
        (cache, clock)
    }

    #[test]
    fn test_map_new() {
        let cache = MapCache::new(30).unwrap();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.ttl(), TimeDelta::seconds(30));
    }

    #[test]
    fn test_map_new_zero_ttl() {
        assert!(matches!(MapCache::new(0), Err(CacheError::InvalidTtl(0))));
    }

    #[test]
    fn test_map_contains_miss_then_hit() {
        let (mut cache, clock) = cache_with_clock(10);

        let first = cache.contains("msg-1");
        assert!(!first.present);
        assert_eq!(first.first_seen, clock.now());

        clock.advance_secs(2);
        let second = cache.contains("msg-1");
        assert!(second.present);
        assert_eq!(second.first_seen, first.first_seen);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_map_insert_overwrites_timestamp() {
        let (mut cache, clock) = cache_with_clock(10);

        cache.insert("dup");
        clock.advance_secs(4);
        cache.insert("dup");

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek("dup"), Some(clock.now()));
        assert_eq!(cache.contains("dup").first_seen, clock.now());
    }

    #[test]
    fn test_map_overwrite_extends_lifetime() {
        let (mut cache, clock) = cache_with_clock(10);

        cache.insert("dup");
        clock.advance_secs(8);
        cache.insert("dup");
        clock.advance_secs(8);

        // 16s since the first insert but only 8s since the overwrite
        assert!(cache.contains("dup").present);
    }

    #[test]
    fn test_map_evicts_expired_anywhere() {
        let (mut cache, clock) = cache_with_clock(10);

        cache.insert("old-1");
        cache.insert("old-2");
        clock.advance_secs(6);
        cache.insert("young");
        clock.advance_secs(5);

        assert_eq!(cache.evict_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.peek("young").is_some());
        assert!(cache.peek("old-1").is_none());
        assert_eq!(cache.stats().evictions, 2);
    }

    #[test]
    fn test_map_entry_at_exact_ttl_is_live() {
        let (mut cache, clock) = cache_with_clock(10);

        cache.contains("msg-1");
        clock.advance_secs(10);
        assert!(cache.contains("msg-1").present);

        clock.advance_millis(1);
        assert!(!cache.contains("msg-1").present);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_map_empty_key_is_ignored() {
        let (mut cache, _clock) = cache_with_clock(10);

        cache.insert("");
        assert!(!cache.contains("").present);

        assert!(cache.is_empty());
        assert_eq!(cache.peek(""), None);
        assert_eq!(cache.stats().ignored_keys, 2);
    }

    #[test]
    fn test_map_stats_track_lookups() {
        let (mut cache, clock) = cache_with_clock(1);

        cache.contains("a");
        cache.contains("a");
        clock.advance_secs(2);
        cache.contains("a");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.live_entries, 1);
    }
}
