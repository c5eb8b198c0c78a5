//! Backend Module
//!
//! The shared presence-cache contract and construction-time selection of a
//! storage strategy.

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::cache::{CacheStats, Clock, Lookup, MapCache, SequenceCache, SystemClock, MAX_TTL_SECS};
use crate::error::{CacheError, Result};

// == Time Cache Trait ==
/// A cache answering "have I seen this key within the TTL?".
///
/// Eviction is lazy: implementations drop expired entries at the start of
/// every [`contains`](TimeCache::contains) call, never on a timer.
pub trait TimeCache: fmt::Debug {
    /// Checks for `key` and records it if absent.
    ///
    /// Expired entries are evicted first. On a hit the original insertion
    /// time is returned and nothing is stored; on a miss the key is inserted
    /// and its new timestamp returned. An empty key is ignored and reported
    /// as a miss stamped with the current time.
    ///
    /// An empty key skips eviction, so it never changes the stored count.
    fn contains(&mut self, key: &str) -> Lookup;

    /// Records `key` at the current time without checking for it first.
    ///
    /// Empty keys are ignored.
    fn insert(&mut self, key: &str);

    /// Removes every entry older than the TTL and returns how many went.
    fn evict_expired(&mut self) -> usize;

    /// Number of entries currently stored, as tracked by the cache.
    ///
    /// Entries that expired since the last eviction pass are still counted.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The lifetime of an entry.
    fn ttl(&self) -> TimeDelta;

    /// Snapshot of usage counters.
    fn stats(&self) -> CacheStats;
}

// == Backend ==
/// Storage strategy used by a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Append-ordered sequence pruned from the front
    #[default]
    Sequence,
    /// Hash map scanned in full on every eviction
    Map,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Sequence => f.write_str("sequence"),
            Backend::Map => f.write_str("map"),
        }
    }
}

impl FromStr for Backend {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequence" | "seq" | "slice" => Ok(Backend::Sequence),
            "map" | "dict" | "hash" => Ok(Backend::Map),
            _ => Err(CacheError::UnknownBackend(s.to_string())),
        }
    }
}

// == Builders ==
/// Builds a cache with the given backend, reading the system clock.
pub fn build(backend: Backend, ttl_secs: u64) -> Result<Box<dyn TimeCache>> {
    build_with_clock(backend, ttl_secs, SystemClock)
}

/// Builds a cache with the given backend and clock.
pub fn build_with_clock<C>(backend: Backend, ttl_secs: u64, clock: C) -> Result<Box<dyn TimeCache>>
where
    C: Clock + 'static,
{
    let cache: Box<dyn TimeCache> = match backend {
        Backend::Sequence => Box::new(SequenceCache::with_clock(ttl_secs, clock)?),
        Backend::Map => Box::new(MapCache::with_clock(ttl_secs, clock)?),
    };
    Ok(cache)
}

/// Converts a TTL in seconds into a time delta, rejecting zero and overflow.
pub(crate) fn ttl_from_secs(ttl_secs: u64) -> Result<TimeDelta> {
    if ttl_secs == 0 || ttl_secs > MAX_TTL_SECS {
        return Err(CacheError::InvalidTtl(ttl_secs));
    }
    i64::try_from(ttl_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or(CacheError::InvalidTtl(ttl_secs))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    #[test]
    fn test_backend_parse() {
        assert_eq!("sequence".parse::<Backend>().unwrap(), Backend::Sequence);
        assert_eq!("Map".parse::<Backend>().unwrap(), Backend::Map);
        assert_eq!(" dict ".parse::<Backend>().unwrap(), Backend::Map);
        assert_eq!("slice".parse::<Backend>().unwrap(), Backend::Sequence);
    }

    #[test]
    fn test_backend_parse_unknown() {
        let result = "btree".parse::<Backend>();
        assert!(matches!(result, Err(CacheError::UnknownBackend(name)) if name == "btree"));
    }

    #[test]
    fn test_backend_display_roundtrips() {
        for backend in [Backend::Sequence, Backend::Map] {
            assert_eq!(backend.to_string().parse::<Backend>().unwrap(), backend);
        }
    }

    #[test]
    fn test_ttl_from_secs() {
        assert_eq!(ttl_from_secs(30).unwrap(), TimeDelta::seconds(30));
        assert_eq!(ttl_from_secs(0), Err(CacheError::InvalidTtl(0)));
        assert_eq!(ttl_from_secs(u64::MAX), Err(CacheError::InvalidTtl(u64::MAX)));
        assert!(ttl_from_secs(MAX_TTL_SECS).is_ok());
    }

    #[test]
    fn test_build_selects_backend() {
        for backend in [Backend::Sequence, Backend::Map] {
            let clock = ManualClock::starting_now();
            let mut cache = build_with_clock(backend, 10, clock).unwrap();

            assert!(cache.is_empty());
            assert_eq!(cache.ttl(), TimeDelta::seconds(10));
            assert!(!cache.contains("a").present);
            assert!(cache.contains("a").present);
        }

        let debug = format!("{:?}", build(Backend::Map, 5).unwrap());
        assert!(debug.starts_with("MapCache"));
    }

    #[test]
    fn test_empty_key_lookup_skips_eviction() {
        for backend in [Backend::Sequence, Backend::Map] {
            let clock = ManualClock::starting_now();
            let mut cache = build_with_clock(backend, 10, clock.clone()).unwrap();

            cache.insert("a");
            clock.advance_secs(11);

            assert!(!cache.contains("").present);
            assert_eq!(cache.len(), 1, "expired entry stays until a real lookup");
            assert_eq!(cache.evict_expired(), 1);
        }
    }

    #[test]
    fn test_build_rejects_zero_ttl() {
        assert!(matches!(
            build(Backend::Sequence, 0),
            Err(CacheError::InvalidTtl(0))
        ));
    }
}
