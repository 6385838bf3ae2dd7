// src/exec/multiplex.rs

//! Per-command output draining.
//!
//! Each child process gets two drain tasks, one per pipe. A drain reads the
//! pipe line by line and writes every line, decorated with the command's
//! label, to the shared console sink.
//!
//! Framing rules:
//! - lines end at `\n`; a trailing `\r` is stripped as well
//! - a final line with no terminator is still forwarded
//! - invalid UTF-8 is replaced with U+FFFD instead of failing the drain
//!
//! An I/O error ends that drain only; the process and the other pipe are not
//! affected.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::CommandSpec;
use crate::console::format::decorate;
use crate::console::{ConsoleSink, SharedSink};
use crate::engine::completion::CompletionGuard;
use crate::types::Color;

/// Which pipe a drain is reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// Spawns drain tasks for one command.
#[derive(Clone)]
pub struct OutputMultiplexer {
    label: Arc<str>,
    color: Color,
    sink: SharedSink,
}

impl fmt::Debug for OutputMultiplexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputMultiplexer")
            .field("label", &self.label)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl OutputMultiplexer {
    pub fn new(spec: &CommandSpec, sink: SharedSink) -> Self {
        Self {
            label: Arc::from(spec.label.as_str()),
            color: spec.color,
            sink,
        }
    }

    /// Drain `reader` on a new Tokio task. `guard` is released when the
    /// stream ends, whether normally or with an error.
    pub fn spawn_drain<R>(&self, stream: StreamKind, reader: R, guard: CompletionGuard) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let label = Arc::clone(&self.label);
        let color = self.color;
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            match drain_stream(reader, &label, color, sink.as_ref()).await {
                Ok(lines) => {
                    debug!(command = %label, %stream, lines, "stream reached end");
                }
                Err(e) => {
                    warn!(command = %label, %stream, error = %e, "error reading stream; drain stopped");
                }
            }
            guard.complete();
        })
    }
}

/// Read `reader` to the end, forwarding each decorated line to `sink`.
///
/// Returns the number of lines forwarded.
pub async fn drain_stream<R>(
    reader: R,
    label: &str,
    color: Color,
    sink: &dyn ConsoleSink,
) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut forwarded = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(forwarded);
        }
        sink.write_line(&decorate(label, color, &frame_line(&buf)));
        forwarded += 1;
    }
}

/// Strip the line terminator and decode lossily.
fn frame_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecSink(Mutex<Vec<String>>);

    impl ConsoleSink for VecSink {
        fn write_line(&self, line: &str) {
            self.0.lock().unwrap().push(line.to_string());
        }
    }

    impl VecSink {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    #[test]
    fn framing_strips_lf_and_crlf() {
        assert_eq!(frame_line(b"hi\n"), "hi");
        assert_eq!(frame_line(b"hi\r\n"), "hi");
        assert_eq!(frame_line(b"partial"), "partial");
        assert_eq!(frame_line(b"\n"), "");
    }

    #[test]
    fn framing_replaces_invalid_utf8() {
        assert_eq!(frame_line(b"a\xffb\n"), "a\u{fffd}b");
    }

    #[tokio::test]
    async fn drain_preserves_order_and_flushes_partial_line() {
        let sink = VecSink::default();
        let input: &[u8] = b"one\ntwo\r\n\nthree";
        let n = drain_stream(input, "A", Color::White, &sink).await.unwrap();

        assert_eq!(n, 4);
        let prefix = "\x1b[37m[A]\x1b[0m";
        assert_eq!(
            sink.lines(),
            vec![
                format!("{prefix} one"),
                format!("{prefix} two"),
                format!("{prefix} "),
                format!("{prefix} three"),
            ]
        );
    }

    #[tokio::test]
    async fn empty_stream_forwards_nothing() {
        let sink = VecSink::default();
        let input: &[u8] = b"";
        assert_eq!(drain_stream(input, "A", Color::Red, &sink).await.unwrap(), 0);
        assert!(sink.lines().is_empty());
    }
}
