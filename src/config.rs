//! Configuration Module
//!
//! Handles loading the `seen` filter configuration from environment variables.

use std::env;

use crate::cache::{Backend, DEFAULT_TTL_SECS};

/// Filter configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How long a key counts as seen, in seconds
    pub ttl_secs: u64,
    /// Storage strategy for the cache
    pub backend: Backend,
    /// Log final cache statistics as JSON on exit
    pub print_stats: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `SEEN_TTL_SECS` - Entry lifetime in seconds (default: 30)
    /// - `SEEN_BACKEND` - `sequence` or `map` (default: sequence)
    /// - `SEEN_PRINT_STATS` - `true`/`1` to log stats on exit (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_secs: env::var("SEEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_secs),
            backend: env::var("SEEN_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.backend),
            print_stats: env::var("SEEN_PRINT_STATS")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.print_stats),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            backend: Backend::Sequence,
            print_stats: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
