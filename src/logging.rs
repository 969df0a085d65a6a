//! Pluggable log sinks.
//!
//! Everything in this crate reports through a [`Logger`]. The default
//! [`ConsoleLogger`] prints timestamped lines to stdout; [`TracingLogger`]
//! forwards to `tracing`; [`MemoryLogger`] keeps entries in a shared buffer
//! so an embedding application (or a test) can inspect them.
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Width of the separator emitted by [`Logger::log_rule`].
pub const RULE_WIDTH: usize = 25;

const TIMESTAMP_FORMAT: &str = "%y-%m-%d/%H:%M:%S";
const MEMORY_LOG_CAPACITY: usize = 1000;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Capability every log sink provides. Implementations own formatting and output.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str, level: LogLevel, suppress_timestamp: bool);

    fn log_rule(&self, level: LogLevel, suppress_timestamp: bool) {
        self.log(&"-".repeat(RULE_WIDTH), level, suppress_timestamp);
    }
}

/// Format one line the way [`ConsoleLogger`] prints it.
pub fn format_line(message: &str, level: LogLevel, suppress_timestamp: bool) -> String {
    if suppress_timestamp {
        format!("{}: {}", level, message)
    } else {
        format!("{}-{}: {}", timestamp(), level, message)
    }
}

fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Prints to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str, level: LogLevel, suppress_timestamp: bool) {
        println!("{}", format_line(message, level, suppress_timestamp));
    }
}

/// Forwards to `tracing`; the subscriber decides about timestamps.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str, level: LogLevel, _suppress_timestamp: bool) {
        match level {
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warning => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: Option<String>,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String, suppress_timestamp: bool) -> Self {
        let timestamp = if suppress_timestamp {
            None
        } else {
            Some(timestamp())
        };
        Self {
            level,
            timestamp,
            message,
        }
    }
}

/// Buffers entries in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemoryLogger {
    buffer: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.buffer
            .lock()
            .map(|buf| buf.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Messages logged at exactly `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.messages(level).iter().any(|m| m.contains(needle))
    }

    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
    }
}

impl Logger for MemoryLogger {
    fn log(&self, message: &str, level: LogLevel, suppress_timestamp: bool) {
        let entry = LogEntry::new(level, message.to_string(), suppress_timestamp);
        if let Ok(mut buf) = self.buffer.lock() {
            buf.push_back(entry);
            if buf.len() > MEMORY_LOG_CAPACITY {
                buf.pop_front();
            }
        }
    }
}
