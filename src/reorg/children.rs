//! Child enumeration and the per-item move loop.
//! Only direct children are considered; each move is an independent outcome.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::destination::Destination;
use super::exclude::ExclusionSet;
use super::validate::SourceDir;
use crate::errors::ReorgError;
use crate::gate::{Action, Gate};
use crate::log_sink::{Level, RunLog};

/// Per-source outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveTally {
    pub moved: usize,
    pub failed: usize,
    pub declined: usize,
    pub excluded: usize,
}

/// Move every non-excluded direct child of `source` into `dest`.
///
/// The listing is read in full and sorted by name before anything moves.
/// Failures are logged and counted; they never stop the loop. If the source
/// cannot be listed at all, that single error is recorded and nothing moves.
pub fn move_children(
    source: &SourceDir,
    dest: &Destination,
    exclusions: &ExclusionSet,
    log: &dyn RunLog,
    gate: &mut dyn Gate,
) -> MoveTally {
    let mut tally = MoveTally::default();

    let entries = match fs::read_dir(source.path()) {
        Ok(rd) => rd,
        Err(e) => {
            log.log_error(&ReorgError::ListFailed {
                path: source.path().to_path_buf(),
                source: e,
            });
            tally.failed += 1;
            return tally;
        }
    };

    let mut children = Vec::new();
    for entry in entries {
        match entry {
            Ok(e) => children.push(e),
            Err(e) => {
                // The OS did not return a name for this entry.
                log.log_error(&ReorgError::EntryUnreadable {
                    path: source.path().to_path_buf(),
                    source: e,
                });
                tally.failed += 1;
            }
        }
    }
    children.sort_by_key(|e| e.file_name());

    for entry in children {
        let item = entry.path();
        let name = entry.file_name();
        if exclusions.is_excluded(&name) || item == dest.path() {
            debug!(item = %item.display(), "excluded");
            tally.excluded += 1;
            continue;
        }

        let target = dest.path().join(&name);
        if !gate.should_perform(&Action::move_item(&item, &target)) {
            tally.declined += 1;
            continue;
        }

        match move_one(&item, &target) {
            Ok(()) => {
                log.log(
                    Level::Info,
                    &format!("Moved {} -> {}", item.display(), target.display()),
                );
                tally.moved += 1;
            }
            Err(err) => {
                log.log_error(&err);
                tally.failed += 1;
            }
        }
    }

    tally
}

/// Rename `item` to `target`. An entry already at `target` wins: the move is
/// refused rather than overwriting it.
fn move_one(item: &Path, target: &Path) -> Result<(), ReorgError> {
    if fs::symlink_metadata(target).is_ok() {
        return Err(ReorgError::NameCollision {
            item: item.to_path_buf(),
            dest: target.parent().map(Path::to_path_buf).unwrap_or_default(),
            name: target
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        });
    }
    fs::rename(item, target).map_err(|e| ReorgError::ItemMove {
        item: item.to_path_buf(),
        dest: PathBuf::from(target),
        source: e,
    })
}
