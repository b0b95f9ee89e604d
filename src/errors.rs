//! Typed error definitions for sweep_into.
//! Fatal configuration problems and the local, per-path or per-item failures
//! the reorganizer logs and steps over.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReorgError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Invalid child directory name '{name}': {reason}")]
    InvalidChildName { name: String, reason: &'static str },

    #[error("Invalid exclusion pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Config file {path}: {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    #[error("Source path does not exist: {0}")]
    SourceMissing(PathBuf),

    #[error("Source path is not a directory: {0}")]
    SourceNotDirectory(PathBuf),

    #[error("Cannot inspect source path {path}: {source}")]
    SourceUnreadable { path: PathBuf, source: io::Error },

    #[error("Failed to create destination {path}: {source}")]
    DestinationCreate { path: PathBuf, source: io::Error },

    #[error("Destination exists but is not a directory: {0}")]
    DestinationNotDirectory(PathBuf),

    #[error("Cannot list {path}: {source}")]
    ListFailed { path: PathBuf, source: io::Error },

    #[error("Cannot read an entry of {path}: {source}")]
    EntryUnreadable { path: PathBuf, source: io::Error },

    #[error("An item named '{name}' already exists in {dest}; leaving {item} in place")]
    NameCollision {
        item: PathBuf,
        dest: PathBuf,
        name: String,
    },

    #[error("Failed to move {item} -> {dest}: {source}")]
    ItemMove {
        item: PathBuf,
        dest: PathBuf,
        source: io::Error,
    },
}

impl ReorgError {
    /// Stable numeric code, grouped by taxonomy (1x config, 2x source, 3x destination, 4x item).
    pub fn code(&self) -> u16 {
        match self {
            ReorgError::LoggingInit(_) => 10,
            ReorgError::InvalidChildName { .. } => 11,
            ReorgError::InvalidPattern { .. } => 12,
            ReorgError::ConfigFile { .. } => 13,
            ReorgError::SourceMissing(_) => 20,
            ReorgError::SourceNotDirectory(_) => 21,
            ReorgError::SourceUnreadable { .. } => 22,
            ReorgError::DestinationCreate { .. } => 30,
            ReorgError::DestinationNotDirectory(_) => 31,
            ReorgError::ListFailed { .. } => 40,
            ReorgError::EntryUnreadable { .. } => 41,
            ReorgError::NameCollision { .. } => 42,
            ReorgError::ItemMove { .. } => 43,
        }
    }

    /// Taxonomy bucket, used as the `kind` field on error events.
    pub fn kind(&self) -> &'static str {
        match self.code() / 10 {
            1 => "configuration",
            2 => "invalid_source",
            3 => "destination_create",
            _ => "item_move",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_codes() {
        let missing = ReorgError::SourceMissing(PathBuf::from("/nope"));
        assert_eq!(missing.kind(), "invalid_source");

        let init = ReorgError::LoggingInit("boom".into());
        assert_eq!(init.kind(), "configuration");

        let collision = ReorgError::NameCollision {
            item: PathBuf::from("/d/a.txt"),
            dest: PathBuf::from("/d/Documents"),
            name: "a.txt".into(),
        };
        assert_eq!(collision.kind(), "item_move");
        assert!(collision.to_string().contains("a.txt"));
    }

    #[test]
    fn io_cause_is_part_of_message() {
        let err = ReorgError::ItemMove {
            item: PathBuf::from("/d/a.txt"),
            dest: PathBuf::from("/d/Documents/a.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/d/a.txt"));
        assert!(msg.contains("access denied"));
    }
}
