//! Core library for `sweep_into`.
//!
//! Sweeps the direct children of one or more directories into a subdirectory
//! beneath each (by default `Documents`), skipping names that match exclusion
//! globs. Every directory creation and move passes through a `Gate`, which is
//! how dry-run and interactive confirmation are implemented. Per-path and
//! per-item failures are logged through `RunLog` and never abort the batch.

pub mod cli;
pub mod config;
pub mod errors;
pub mod gate;
pub mod log_sink;
pub mod logging;
pub mod output;
pub mod platform;
pub mod reorg;

pub use config::{Config, LogLevel, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::ReorgError;
pub use gate::{Action, Gate};
pub use log_sink::{Level, MemoryLog, RunLog, TracingLog};
pub use reorg::{ExclusionSet, Plan, RunSummary, run};
