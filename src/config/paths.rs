//! Default path helpers and symlink checks.
//! Determines the config file location, the dated default log file, and
//! detects symlinked ancestors for log-file safety.

use chrono::Local;
use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{CONFIG_ENV, TOOL_NAME};

/// Config file path: `$SWEEP_INTO_CONFIG` if set, else `<config_dir>/sweep_into/config.xml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(explicit));
    }
    if let Some(mut base) = config_dir() {
        base.push(TOOL_NAME);
        base.push("config.xml");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join(TOOL_NAME)
                .join("config.xml")
        })
    }
}

/// Default log file: `./sweep_into_<YYYY-MM-DD>.log` in the working directory.
pub fn default_log_path() -> PathBuf {
    PathBuf::from(dated_log_name(&Local::now().format("%Y-%m-%d").to_string()))
}

fn dated_log_name(date: &str) -> String {
    format!("{TOOL_NAME}_{date}.log")
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if !anc.as_os_str().is_empty() && anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
