//! Process-wide `tracing` subscriber setup.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::domain::{AppError, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` takes precedence over both
/// the configured level and `verbose`.
///
/// When file output is enabled, the returned guard owns the background
/// writer; buffered lines are flushed when it is dropped.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<Option<WorkerGuard>, AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive(config, verbose)).map_err(|err| {
            AppError::config_error(format!("Invalid logging level '{}': {}", config.level, err))
        })?,
    };

    let console = config
        .to_console
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    let (file_layer, guard, log_path) = if config.to_file {
        let (writer, guard, path) = file_writer(config, &Local::now())?;
        (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard), Some(path))
    } else {
        (None, None, None)
    };

    if tracing_subscriber::registry().with(filter).with(console).with(file_layer).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    if let Some(path) = log_path {
        tracing::debug!(path = %path.display(), "writing log file");
    }
    Ok(guard)
}

fn file_writer(
    config: &LoggingConfig,
    now: &DateTime<Local>,
) -> Result<(NonBlocking, WorkerGuard, PathBuf), AppError> {
    fs::create_dir_all(&config.log_dir)?;
    let file_name = log_file_name(now);
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&file_name)
        .build(&config.log_dir)
        .map_err(|err| {
            AppError::config_error(format!(
                "Failed to open log file in {}: {}",
                config.log_dir.display(),
                err
            ))
        })?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    Ok((writer, guard, config.log_dir.join(file_name)))
}

fn directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose { "debug".to_string() } else { config.level.to_lowercase() }
}

fn log_file_name(now: &DateTime<Local>) -> String {
    format!("run_{}.log", now.format("%Y%m%d_%H%M%S"))
}
