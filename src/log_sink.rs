//! The log collaborator the reorganizer writes through.
//!
//! `TracingLog` forwards to the global tracing subscriber and owns the
//! non-blocking writer's guard; `MemoryLog` keeps entries in memory.

use std::fmt;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use crate::errors::ReorgError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        })
    }
}

pub trait RunLog {
    fn log(&self, level: Level, message: &str);

    /// Record a local error. Sinks with structured output may add fields.
    fn log_error(&self, err: &ReorgError) {
        self.log(Level::Error, &err.to_string());
    }

    /// Block until every entry written so far is durable.
    fn flush(&self);
}

/// Sink backed by `tracing`. Holds the file writer's guard until `flush`.
#[derive(Default)]
pub struct TracingLog {
    guard: Mutex<Option<WorkerGuard>>,
}

impl TracingLog {
    pub fn new(guard: Option<WorkerGuard>) -> Self {
        Self {
            guard: Mutex::new(guard),
        }
    }
}

impl RunLog for TracingLog {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Info => info!("{message}"),
            Level::Error => error!("{message}"),
        }
    }

    fn log_error(&self, err: &ReorgError) {
        error!(code = err.code(), kind = err.kind(), "{err}");
    }

    fn flush(&self) {
        // Dropping the guard drains the background worker.
        if let Ok(mut g) = self.guard.lock() {
            let _ = g.take();
        }
    }
}

/// In-memory sink, for tests and for embedding the reorganizer.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(Level, String)>>,
}

impl MemoryLog {
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// True if some entry at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    pub fn errors(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == Level::Error)
            .map(|(_, m)| m)
            .collect()
    }
}

impl RunLog for MemoryLog {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut e) = self.entries.lock() {
            e.push((level, message.to_string()));
        }
    }

    // Entries are held in memory; nothing to drain.
    fn flush(&self) {}
}
