//! Cache Module
//!
//! Key presence caching with lazy TTL eviction over two storage strategies.

mod backend;
mod clock;
mod entry;
mod map;
mod sequence;
mod stats;


// Re-export public types
pub use backend::{build, build_with_clock, Backend, TimeCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{Entry, Lookup};
pub use map::MapCache;
pub use sequence::SequenceCache;
pub use stats::CacheStats;

// == Public Constants ==
/// Largest accepted TTL in seconds
pub const MAX_TTL_SECS: u64 = (i64::MAX / 1_000) as u64;

/// TTL used when none is configured
pub const DEFAULT_TTL_SECS: u64 = 30;
