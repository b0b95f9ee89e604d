//! Destination resolution: `<source>/<child_name>`, created on demand.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::validate::SourceDir;
use crate::errors::ReorgError;
use crate::gate::{Action, Gate};
use crate::log_sink::{Level, RunLog};

/// Where children of one source go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    path: PathBuf,
    state: DestinationState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationState {
    /// Was already a directory; left untouched.
    Existing,
    /// Created by this run.
    Created,
    /// Absent, and the gate declined creating it.
    Declined,
}

impl Destination {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if moves into this destination can be attempted.
    pub fn is_ready(&self) -> bool {
        self.state != DestinationState::Declined
    }
}

/// Compute the destination for `source` and make sure it exists.
///
/// An existing directory is a no-op. A non-directory occupying the name is an
/// error. Creation goes through `gate`; a creation failure aborts this source only.
pub fn resolve_destination(
    source: &SourceDir,
    child_name: &str,
    log: &dyn RunLog,
    gate: &mut dyn Gate,
) -> Result<Destination, ReorgError> {
    let path = source.path().join(child_name);

    match fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => {
            return Ok(Destination {
                path,
                state: DestinationState::Existing,
            });
        }
        Ok(_) => return Err(ReorgError::DestinationNotDirectory(path)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ReorgError::DestinationCreate { path, source: e }),
    }

    if !gate.should_perform(&Action::create_dir(&path)) {
        return Ok(Destination {
            path,
            state: DestinationState::Declined,
        });
    }

    match fs::create_dir(&path) {
        Ok(()) => {
            log.log(
                Level::Info,
                &format!("Created destination directory {}", path.display()),
            );
            Ok(Destination {
                path,
                state: DestinationState::Created,
            })
        }
        // Someone else created it between the check and now.
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(Destination {
            path,
            state: DestinationState::Existing,
        }),
        Err(e) => Err(ReorgError::DestinationCreate { path, source: e }),
    }
}
