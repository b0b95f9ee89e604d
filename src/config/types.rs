//! Core configuration types.
//! - Config holds the resolved invocation settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use super::{CHILD_NAME_DEFAULT, EXCLUDE_DEFAULT};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Resolved invocation settings. Built once, then only read.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directories whose direct children get swept
    pub sources: Vec<PathBuf>,
    /// Name of the subdirectory created under each source
    pub child_name: String,
    /// Glob patterns matched against child names; matches are never moved
    pub exclude: Vec<String>,
    /// File sink location
    pub log_file: PathBuf,
    pub log_to_console: bool,
    pub log_to_file: bool,
    pub log_level: LogLevel,
    /// Emit JSON log lines instead of compact text
    pub log_json: bool,
    /// If true, report actions but do not modify the filesystem
    pub dry_run: bool,
    /// If true, ask before every mutating action
    pub confirm: bool,
    /// If true, any local error turns into a failing exit status
    pub fail_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            child_name: CHILD_NAME_DEFAULT.to_string(),
            exclude: EXCLUDE_DEFAULT.iter().map(|s| s.to_string()).collect(),
            log_file: paths::default_log_path(),
            log_to_console: false,
            log_to_file: true,
            log_level: LogLevel::Normal,
            log_json: false,
            dry_run: false,
            confirm: false,
            fail_on_error: false,
        }
    }
}
