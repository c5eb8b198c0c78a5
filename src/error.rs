//! Error types for the presence cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building a cache.
///
/// Lookups, inserts and evictions never fail; only construction is checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// TTL is zero or does not fit in a time delta
    #[error("Invalid TTL: {0} seconds (must be between 1 and {max})", max = crate::cache::MAX_TTL_SECS)]
    InvalidTtl(u64),

    /// Backend name did not match any storage strategy
    #[error("Unknown backend: {0} (expected `sequence` or `map`)")]
    UnknownBackend(String),
}

// == Result Type Alias ==
/// Convenience Result type for the presence cache.
pub type Result<T> = std::result::Result<T, CacheError>;
