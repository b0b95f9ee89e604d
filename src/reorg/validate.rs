//! Source validation: turn a caller-supplied path into a typed directory handle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::ReorgError;

/// A source path confirmed to be an existing directory at validation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir {
    path: PathBuf,
}

impl SourceDir {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read-only check that `path` exists and is a directory (symlinks followed).
/// A failing metadata query is reported separately from "missing".
pub fn validate_source(path: &Path) -> Result<SourceDir, ReorgError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(SourceDir {
            path: dunce::simplified(path).to_path_buf(),
        }),
        Ok(_) => Err(ReorgError::SourceNotDirectory(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ReorgError::SourceMissing(path.to_path_buf()))
        }
        Err(e) => Err(ReorgError::SourceUnreadable {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
