//! Tracing initialization.
//! Builds a registry with an optional console layer (stderr) and an optional
//! file layer, each compact or JSON, filtered by the configured LogLevel.
//!
//! Implementation notes:
//! - File logging uses tracing_appender::non_blocking; the WorkerGuard ends up
//!   inside the returned TracingLog and is dropped by `flush`.
//! - File logging is refused if any ancestor of the file path is a symlink.
//! - Failure to set up a requested sink is fatal for the invocation.

use chrono::Local;
use std::fmt as stdfmt;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::{Registry, registry};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, LogLevel, path_has_symlink_ancestor};
use crate::errors::ReorgError;
use crate::log_sink::TracingLog;
use crate::platform::open_log_file_append;

pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Local timestamp (YYYY-MM-DD HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

#[inline]
fn env_filter_from_level(level_filter: LevelFilter) -> EnvFilter {
    let level_str = match level_filter {
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
        _ => "info",
    };
    EnvFilter::new(level_str)
}

fn console_layer(level: LevelFilter, json: bool) -> BoxedLayer {
    let ansi = atty::is(atty::Stream::Stderr);
    if json {
        tsfmt::layer()
            .json()
            .with_timer(LocalHumanTime)
            .with_target(false)
            .with_writer(io::stderr)
            .with_filter(env_filter_from_level(level))
            .boxed()
    } else {
        tsfmt::layer()
            .compact()
            .with_timer(LocalHumanTime)
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(io::stderr)
            .with_filter(env_filter_from_level(level))
            .boxed()
    }
}

fn file_layer(
    path: &Path,
    level: LevelFilter,
    json: bool,
) -> Result<(BoxedLayer, WorkerGuard), ReorgError> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => {
            return Err(ReorgError::LoggingInit(format!(
                "refusing to log to {}: an ancestor directory is a symlink",
                path.display()
            )));
        }
        Err(e) => {
            return Err(ReorgError::LoggingInit(format!(
                "cannot check log path {} for symlinks: {e}",
                path.display()
            )));
        }
    }

    let file = open_log_file_append(path).map_err(|e| {
        ReorgError::LoggingInit(format!("cannot open log file {}: {e}", path.display()))
    })?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let layer = if json {
        tsfmt::layer()
            .json()
            .with_timer(LocalHumanTime)
            .with_target(false)
            .with_writer(writer)
            .with_filter(env_filter_from_level(level))
            .boxed()
    } else {
        tsfmt::layer()
            .compact()
            .with_timer(LocalHumanTime)
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(env_filter_from_level(level))
            .boxed()
    };
    Ok((layer, guard))
}

/// Build the configured layers without installing them.
/// The guard is Some when a file layer was created.
pub fn build_layers(cfg: &Config) -> Result<(Vec<BoxedLayer>, Option<WorkerGuard>), ReorgError> {
    let level = to_level_filter(cfg.log_level);
    let mut layers = Vec::new();
    let mut guard = None;

    if cfg.log_to_console {
        layers.push(console_layer(level, cfg.log_json));
    }
    if cfg.log_to_file {
        let (layer, g) = file_layer(&cfg.log_file, level, cfg.log_json)?;
        layers.push(layer);
        guard = Some(g);
    }
    Ok((layers, guard))
}

/// Install the global subscriber and hand back the sink the reorganizer logs through.
pub fn init_tracing(cfg: &Config) -> Result<TracingLog, ReorgError> {
    let (layers, guard) = build_layers(cfg)?;
    registry()
        .with(layers)
        .try_init()
        .map_err(|e| ReorgError::LoggingInit(e.to_string()))?;
    Ok(TracingLog::new(guard))
}
