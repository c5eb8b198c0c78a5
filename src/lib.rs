//! Seen Cache - An in-memory key presence cache
//!
//! Answers "have I seen this key within the last T seconds?" using lazy TTL
//! eviction over either an ordered sequence or a hash map.

pub mod cache;
pub mod config;
pub mod error;
pub mod filter;

pub use cache::{build, Backend, Lookup, MapCache, SequenceCache, TimeCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use filter::{filter_unseen, FilterSummary};
