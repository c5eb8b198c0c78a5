//! seen - a streaming duplicate filter
//!
//! Reads newline-delimited keys from stdin and writes each one to stdout
//! only if it has not been seen within the configured TTL.

use std::io::{self, BufWriter};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seen_cache::{build, filter_unseen, Config};

/// Main entry point for the `seen` filter.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr, stdout stays clean)
/// 2. Load configuration from environment variables
/// 3. Build the cache with the configured backend and TTL
/// 4. Filter stdin into stdout until end of input
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seen_cache=info,seen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={}, ttl={}s",
        config.backend, config.ttl_secs
    );

    let mut cache = build(config.backend, config.ttl_secs)
        .with_context(|| format!("Failed to build {} cache", config.backend))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = filter_unseen(cache.as_mut(), stdin.lock(), BufWriter::new(stdout.lock()))
        .context("Failed to filter input")?;

    info!(
        "Input finished: read={}, written={}, dropped={}",
        summary.read, summary.written, summary.dropped
    );

    if config.print_stats {
        let stats = serde_json::to_string(&cache.stats()).context("Failed to encode stats")?;
        info!(stats = %stats, "Final cache statistics");
    }

    Ok(())
}
