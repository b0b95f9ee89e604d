//! Config validation logic.
//! Checks the child directory name and compiles the exclusion patterns, before
//! any filesystem work happens.

use tracing::debug;

use super::types::Config;
use crate::errors::ReorgError;
use crate::reorg::ExclusionSet;

/// Normalize `cfg` in place and compile its exclusion set.
///
/// The child name must be a single path component: non-empty, no separators,
/// and neither `.` nor `..`.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<ExclusionSet, ReorgError> {
    cfg.child_name = cfg.child_name.trim().to_string();
    check_child_name(&cfg.child_name)?;

    cfg.exclude.retain(|p| !p.trim().is_empty());
    let exclusions = ExclusionSet::new(&cfg.exclude, &cfg.child_name)?;
    debug!(child = %cfg.child_name, patterns = cfg.exclude.len(), "config validated");
    Ok(exclusions)
}

fn check_child_name(name: &str) -> Result<(), ReorgError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name must not be '.' or '..'")
    } else if name.contains('/') || name.contains('\\') {
        Some("name must be a single directory name, not a path")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ReorgError::InvalidChildName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
