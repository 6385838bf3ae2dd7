use std::sync::{Arc, Mutex};

use xrun::console::{ConsoleSink, SharedSink};

/// Console sink that keeps every line in memory.
///
/// Lines are stored exactly as written, including color escapes; use
/// [`RecordingSink::plain_lines`] to compare against undecorated text.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle suitable for `Orchestrator::new`.
    pub fn shared(&self) -> SharedSink {
        Arc::new(self.clone())
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Lines with ANSI escape sequences removed.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines().iter().map(|l| strip_ansi(l)).collect()
    }

    /// Plain lines that start with `[label] `, with that prefix removed.
    pub fn output_of(&self, label: &str) -> Vec<String> {
        let prefix = format!("[{label}] ");
        self.plain_lines()
            .into_iter()
            .filter_map(|l| l.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }
}

impl ConsoleSink for RecordingSink {
    fn write_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// Remove `ESC [ ... <letter>` sequences.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
