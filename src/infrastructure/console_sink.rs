use crate::domain::ports::LogSink;
use std::io::{self, Write};
use tracing::warn;

/// Writes each line to stdout while holding the stdout lock, so lines from
/// concurrent checkouts never interleave.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn emit(&self, line: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{line}") {
            warn!(error = %e, "failed to write progress line");
        }
    }
}

/// Forwards each line as a `tracing` event on the `checkout` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::info!(target: "checkout", "{line}");
    }
}
