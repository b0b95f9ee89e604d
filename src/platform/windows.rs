//! Windows implementations of platform helpers.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Open the log file for appending, creating it and its parent directory if needed.
/// NTFS ACLs are inherited from the parent directory.
pub fn open_log_file_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
