//! Operator-facing logging.
//!
//! Handlers never write to a concrete stream. They go through [`OperatorLog`],
//! which in production forwards to `tracing` and in tests records into memory.

use std::io;
use std::sync::Mutex;

use anyhow::Result;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

pub trait OperatorLog: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards operator output to the global `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl OperatorLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

/// Keeps every entry in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message)
            .collect()
    }

    /// Index of the first entry containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.entries()
            .iter()
            .position(|entry| entry.message.contains(needle))
    }

    fn push(&self, level: Level, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }
}

impl OperatorLog for MemoryLog {
    fn info(&self, message: &str) {
        self.push(Level::INFO, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::ERROR, message);
    }
}

/// Must be held for the lifetime of the process, dropping it flushes and
/// stops the writer threads.
pub struct LogGuard {
    _stdout: WorkerGuard,
    _stderr: WorkerGuard,
}

/// Installs the global subscriber: WARN and ERROR go to stderr, everything
/// else to stdout. Verbosity follows `RUST_LOG`, defaulting to `info`.
pub fn init() -> Result<LogGuard> {
    let (stdout, stdout_guard) = tracing_appender::non_blocking(io::stdout());
    let (stderr, stderr_guard) = tracing_appender::non_blocking(io::stderr());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr.with_max_level(Level::WARN).or_else(stdout))
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(LogGuard {
        _stdout: stdout_guard,
        _stderr: stderr_guard,
    })
}
