//! Platform-specific helpers.
//! Hides the Unix/Windows differences of opening the log file behind one function.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::open_log_file_append;

#[cfg(not(unix))]
pub use windows::open_log_file_append;
