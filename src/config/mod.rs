//! Config module.
//! Provides the invocation config type, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{load_config_from_xml, load_config_from_xml_path};

/// Name used for the binary, the config directory and the default log file.
pub const TOOL_NAME: &str = "sweep_into";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SWEEP_INTO_CONFIG";

pub const CHILD_NAME_DEFAULT: &str = "Documents";

pub const EXCLUDE_DEFAULT: &[&str] = &[
    ".*",
    "Desktop",
    "Documents",
    "Downloads",
    "Favorites",
    "Music",
    "Pictures",
    "Videos",
];
