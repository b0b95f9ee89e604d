//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Source paths are positional; when none are given and stdin is piped,
//!   they are read from stdin, one per line.
//! - Paths are kept as OS strings: no whitespace trimming and no lossy
//!   conversion. Only a surrounding quote pair and one trailing separator are
//!   removed, and only from paths that are valid UTF-8.
//! - --debug is a shorthand for --log-level debug.
//! - --exclude replaces the default exclusion set rather than extending it.

use clap::{ArgAction, Parser, ValueHint};
use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::types::{Config, LogLevel};

/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move the loose children of directories into a subdirectory beneath each"
)]
pub struct Args {
    /// Directories to reorganize. Read from stdin (one per line) when omitted.
    #[arg(value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub sources: Vec<PathBuf>,

    /// Name of the subdirectory created under each source.
    #[arg(short = 'n', long, value_name = "NAME", help = "Destination subdirectory name [default: Documents]")]
    pub child_name: Option<String>,

    /// Exclusion glob, matched against child names. Repeat for several; replaces the defaults.
    #[arg(
        short = 'x',
        long = "exclude",
        value_name = "GLOB",
        action = ArgAction::Append,
        help = "Never move children matching GLOB (repeatable; replaces the default set)"
    )]
    pub exclude: Vec<String>,

    /// Log file path (default: ./sweep_into_<date>.log).
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Also write log lines to stderr.
    #[arg(long, help = "Also write log lines to the console (stderr)")]
    pub log_to_console: bool,

    /// Disable the log file sink.
    #[arg(long, help = "Do not write a log file")]
    pub no_log_file: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(
        long,
        value_name = "LEVEL",
        value_parser = LogLevel::from_str,
        help = "Set log level: quiet, normal, info, debug"
    )]
    pub log_level: Option<LogLevel>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: report actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Ask before each directory creation and move.
    #[arg(long, help = "Prompt before every directory creation and move")]
    pub confirm: bool,

    /// Exit with status 1 if any source or item failed.
    #[arg(long, help = "Exit non-zero when any source path or item failed")]
    pub fail_on_error: bool,

    /// Print where sweep_into looks for its config file, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

impl Args {
    /// Positional sources, sanitized.
    pub fn resolved_sources(&self) -> Vec<PathBuf> {
        self.sources
            .iter()
            .map(|p| clean_path(p.as_os_str()))
            .filter(|p| !p.as_os_str().is_empty())
            .collect()
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        let sources = self.resolved_sources();
        if !sources.is_empty() {
            cfg.sources = sources;
        }
        if let Some(name) = &self.child_name {
            cfg.child_name = name.clone();
        }
        if !self.exclude.is_empty() {
            cfg.exclude = self.exclude.clone();
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = lf.clone();
        }
        if self.log_to_console {
            cfg.log_to_console = true;
        }
        if self.no_log_file {
            cfg.log_to_file = false;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.json {
            cfg.log_json = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.confirm {
            cfg.confirm = true;
        }
        if self.fail_on_error {
            cfg.fail_on_error = true;
        }
    }
}

/// Read source paths from piped input: one per line, blank lines ignored.
///
/// Lines are split as bytes, so a name that is not valid UTF-8 still reaches
/// validation as its own path. Only a read failure of the stream is an error.
pub fn read_sources<R: BufRead>(reader: R) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        out.push(clean_path(&os_string_from_bytes(line)));
    }
    Ok(out)
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    // Piped Windows text is expected to be UTF-8; a bad sequence yields a path
    // that fails validation on its own.
    match String::from_utf8(bytes) {
        Ok(s) => s.into(),
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned().into(),
    }
}

/// Drop a surrounding quote pair left behind by copied listings, plus one
/// trailing separator (but never a bare root). Non-UTF-8 paths pass through.
fn clean_path(raw: &OsStr) -> PathBuf {
    let Some(s) = raw.to_str() else {
        return PathBuf::from(raw);
    };
    let unquoted = strip_quote_pair(s);
    PathBuf::from(strip_trailing_separator(unquoted))
}

fn strip_quote_pair(s: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(q).and_then(|rest| rest.strip_suffix(q)) {
            return inner;
        }
    }
    s
}

fn strip_trailing_separator(s: &str) -> &str {
    if s.len() <= 1 || s.ends_with(":\\") {
        return s;
    }
    let head = s.strip_suffix('/').or_else(|| {
        // A backslash is an ordinary name character on Unix.
        if cfg!(windows) { s.strip_suffix('\\') } else { None }
    });
    head.unwrap_or(s)
}

pub fn parse() -> Args {
    Args::parse()
}
