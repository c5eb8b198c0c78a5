//! Ordered-Sequence Cache Module
//!
//! Stores sightings in insertion order. Because timestamps only grow towards
//! the tail, expired entries always form a prefix that can be dropped in one
//! drain.
//!
//! Keys are not indexed, so the same key can appear more than once if
//! [`TimeCache::insert`] is called directly for a key that is already live.
//! A lookup then reports the oldest occurrence, and a stale duplicate stays
//! in storage until the expired prefix grows past it. [`TimeCache::contains`]
//! on its own never creates duplicates.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, trace};

use crate::cache::backend::ttl_from_secs;
use crate::cache::{CacheStats, Clock, Entry, Lookup, SystemClock, TimeCache};
use crate::error::Result;

// == Sequence Cache ==
/// Presence cache over an append-ordered sequence of entries.
#[derive(Debug)]
pub struct SequenceCache<C: Clock = SystemClock> {
    /// Entries, oldest at the front
    entries: VecDeque<Entry>,
    /// Lifetime of an entry
    ttl: TimeDelta,
    /// Tracked number of stored entries
    count: usize,
    stats: CacheStats,
    clock: C,
}

impl SequenceCache<SystemClock> {
    // == Constructor ==
    /// Creates an empty cache whose entries live for `ttl_secs` seconds.
    pub fn new(ttl_secs: u64) -> Result<Self> {
        Self::with_clock(ttl_secs, SystemClock)
    }
}

impl<C: Clock> SequenceCache<C> {
    /// Creates an empty cache that reads time from `clock`.
    pub fn with_clock(ttl_secs: u64, clock: C) -> Result<Self> {
        Ok(Self {
            entries: VecDeque::new(),
            ttl: ttl_from_secs(ttl_secs)?,
            count: 0,
            stats: CacheStats::new(),
            clock,
        })
    }

    /// Iterates stored entries from oldest to newest, including any that
    /// expired since the last eviction pass.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    fn push(&mut self, key: &str, now: DateTime<Utc>) {
        self.entries.push_back(Entry::new(key, now));
        self.count += 1;
    }

    fn evict_at(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.ttl;
        let boundary = self
            .entries
            .iter()
            .position(|entry| !entry.is_expired(now, ttl))
            .unwrap_or(self.entries.len());

        if boundary > 0 {
            self.entries.drain(..boundary);
            self.count -= boundary;
            self.stats.record_evictions(boundary);
            debug!(removed = boundary, remaining = self.count, "Evicted expired prefix");
        }
        boundary
    }

    fn ignore_empty_key(&mut self) {
        self.stats.record_ignored_key();
        debug!("Ignoring empty key");
    }
}

impl<C: Clock> TimeCache for SequenceCache<C> {
    fn contains(&mut self, key: &str) -> Lookup {
        let now = self.clock.now();
        if key.is_empty() {
            self.ignore_empty_key();
            return Lookup::miss(now);
        }

        self.evict_at(now);

        // Nothing left to scan after a full eviction
        if !self.entries.is_empty() {
            let found = self
                .entries
                .iter()
                .find(|entry| entry.key == key)
                .map(|entry| entry.inserted_at);

            if let Some(inserted_at) = found {
                self.stats.record_hit();
                trace!(key, "Sequence cache hit");
                return Lookup::hit(inserted_at);
            }
        }

        self.push(key, now);
        self.stats.record_miss();
        trace!(key, "Sequence cache miss");
        Lookup::miss(now)
    }

    fn insert(&mut self, key: &str) {
        if key.is_empty() {
            self.ignore_empty_key();
            return;
        }
        let now = self.clock.now();
        self.push(key, now);
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
