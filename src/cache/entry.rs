//! Cache Entry Module
//!
//! Defines a recorded key sighting and the expiry predicate shared by both
//! storage strategies.

use chrono::{DateTime, TimeDelta, Utc};

// == Entry ==
/// A key together with the time it was first recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The recorded key (never empty)
    pub key: String,
    /// When the key was inserted
    pub inserted_at: DateTime<Utc>,
}

impl Entry {
    // == Constructor ==
    /// Creates an entry stamped with `inserted_at`.
    pub fn new(key: impl Into<String>, inserted_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            inserted_at,
        }
    }

    // == Is Expired ==
    /// Checks whether this entry has outlived `ttl` at time `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        is_expired(self.inserted_at, now, ttl)
    }
}

// == Lookup ==
/// Outcome of a presence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    /// True if the key was already present and unexpired
    pub present: bool,
    /// When the key was first seen; for a miss this is the new insertion time
    pub first_seen: DateTime<Utc>,
}

impl Lookup {
    pub(crate) fn hit(first_seen: DateTime<Utc>) -> Self {
        Self {
            present: true,
            first_seen,
        }
    }

    pub(crate) fn miss(first_seen: DateTime<Utc>) -> Self {
        Self {
            present: false,
            first_seen,
        }
    }
}

// == Utility Functions ==
/// Expiry predicate: strictly more than `ttl` has elapsed since `inserted_at`.
///
/// An entry exactly `ttl` old is still live.
pub fn is_expired(inserted_at: DateTime<Utc>, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
    now - inserted_at > ttl
}
