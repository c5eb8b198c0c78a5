//! Line Filter Module
//!
//! Streams newline-delimited keys through a presence cache, passing on only
//! the lines not seen within the TTL.

use std::io::{self, BufRead, Write};

use tracing::trace;

use crate::cache::TimeCache;

// == Filter Summary ==
/// Counts collected while filtering a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Lines read from the input
    pub read: u64,
    /// Lines written to the output
    pub written: u64,
    /// Lines dropped as already seen
    pub dropped: u64,
}

// == Filter Unseen ==
/// Copies each line of `input` to `output` unless `cache` reports it present.
///
/// Blank lines are never recorded, so they always pass through.
pub fn filter_unseen<R, W>(cache: &mut dyn TimeCache, input: R, mut output: W) -> io::Result<FilterSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = FilterSummary::default();

    for line in input.lines() {
        let line = line?;
        summary.read += 1;

        if cache.contains(&line).present {
            summary.dropped += 1;
            trace!(key = %line, "Dropping seen line");
            continue;
        }

        writeln!(output, "{}", line)?;
        summary.written += 1;
    }

    output.flush()?;
    Ok(summary)
}
