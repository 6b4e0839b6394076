//! Output sinks for rendered log lines.

use std::io::Write;
use std::sync::Mutex;

/// Destination stream of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

pub trait Sink: Send + Sync {
    /// Write one line. Failures are swallowed; logging never fails the caller.
    fn write_line(&self, stream: Stream, line: &str);
}

/// Writes to the process's standard output and error streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn write_line(&self, stream: Stream, line: &str) {
        let _ = match stream {
            Stream::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            Stream::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines in write order.
    pub fn lines(&self) -> Vec<(Stream, String)> {
        self.lines.lock().expect("memory sink mutex poisoned").clone()
    }

    /// Captured lines written to `stream`.
    pub fn lines_on(&self, stream: Stream) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line)
            .collect()
    }

    /// Remove and return all captured lines.
    pub fn take(&self) -> Vec<(Stream, String)> {
        std::mem::take(&mut *self.lines.lock().expect("memory sink mutex poisoned"))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().expect("memory sink mutex poisoned").is_empty()
    }
}

impl Sink for MemorySink {
    fn write_line(&self, stream: Stream, line: &str) {
        self.lines
            .lock()
            .expect("memory sink mutex poisoned")
            .push((stream, line.to_string()));
    }
}
