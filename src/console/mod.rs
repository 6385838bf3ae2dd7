// src/console/mod.rs

//! Shared console output.
//!
//! Every producer (drain tasks, process runner, shutdown coordinator) writes
//! through a [`ConsoleSink`]. A sink must emit each line with a single
//! indivisible write so lines from concurrent tasks never interleave.
//!
//! - [`format`] builds the decorated strings (`[label] line`, banner, listing).
//! - [`StdoutSink`] is the production sink.

pub mod format;

use std::io::Write;
use std::sync::Arc;

use tracing::debug;

/// Destination for console lines.
///
/// Implementations are shared between many tasks, hence `Send + Sync`.
pub trait ConsoleSink: Send + Sync {
    /// Write one line. The trailing newline is added by the sink.
    fn write_line(&self, line: &str);
}

/// Shared handle to a sink.
pub type SharedSink = Arc<dyn ConsoleSink>;

/// Writes lines to the process's stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ConsoleSink for StdoutSink {
    fn write_line(&self, line: &str) {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(buf.as_bytes()).and_then(|()| out.flush()) {
            // Nowhere better to report a broken stdout than the log.
            debug!(error = %e, "failed to write console line");
        }
    }
}
