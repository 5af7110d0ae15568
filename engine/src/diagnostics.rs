//! Diagnostic log entries and the sinks that receive them.
//!
//! The engine never writes to the console itself. Every entry point takes a
//! `&dyn DiagnosticSink`; the CLI hands it a [`ConsoleSink`], tests and
//! embedding applications use a [`MemorySink`].

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }
}

/// Receives diagnostics from the engine.
pub trait DiagnosticSink {
    /// Record one entry.
    fn log(&self, entry: LogEntry);

    fn info(&self, msg: String) {
        self.log(LogEntry::info(msg));
    }

    fn success(&self, msg: String) {
        self.log(LogEntry::success(msg));
    }

    fn warning(&self, msg: String) {
        self.log(LogEntry::warning(msg));
    }

    fn error(&self, msg: String) {
        self.log(LogEntry::error(msg));
    }
}

/// Writes entries to stderr with a level prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(entry.indent as usize);
        eprintln!("{}{} {}", indent, prefix, entry.message);
    }
}

/// Keeps every entry in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the entries recorded so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Messages recorded at `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogLevel::Warning)
    }
}

impl DiagnosticSink for MemorySink {
    fn log(&self, entry: LogEntry) {
        self.entries.borrow_mut().push(entry);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn log(&self, _entry: LogEntry) {}
}
