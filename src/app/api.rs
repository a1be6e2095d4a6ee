//! API Facade for the application.
//!
//! Each function builds a filesystem-backed context for one config
//! directory and runs the matching command.

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::app::commands::{create_domain, init, list, run, schedule, validate};
use crate::app::compose;
use crate::domain::{AppError, LoggingConfig, RunReport};
use crate::services::FilesystemConfigSource;

pub use crate::app::commands::init::InitOutcome;
pub use crate::app::commands::list::DomainSummary;
pub use crate::app::commands::run::RunOptions;
pub use crate::app::commands::schedule::{ScheduleOptions, ScheduleOutcome};
pub use crate::app::commands::validate::ValidateOutcome;

/// Environment variable naming the config directory.
pub const CONFIG_DIR_ENV: &str = "DATAFLOW_CONFIG_DIR";
/// Config directory used when neither the flag nor the variable is set.
pub const DEFAULT_CONFIG_DIR: &str = "conf";

/// `--config-dir`, then `DATAFLOW_CONFIG_DIR`, then `conf`.
pub fn resolve_config_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var(CONFIG_DIR_ENV) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_CONFIG_DIR),
    }
}

fn context(config_dir: &Path) -> AppContext<FilesystemConfigSource> {
    AppContext::with_builtins(FilesystemConfigSource::new(config_dir))
}

/// Logging settings from the global document, or defaults when it cannot
/// be read. The command itself reports the configuration error.
pub fn logging_config_at(config_dir: &Path) -> LoggingConfig {
    compose::load_global(&FilesystemConfigSource::new(config_dir))
        .map(|global| global.logging)
        .unwrap_or_default()
}

/// Compose and run the selected domains once.
pub fn run_at(config_dir: &Path, options: &RunOptions) -> Result<RunReport, AppError> {
    run::execute(&context(config_dir), options)
}

/// Compose every domain without running anything.
pub fn validate_at(config_dir: &Path) -> Result<ValidateOutcome, AppError> {
    validate::execute(&context(config_dir))
}

pub fn list_at(config_dir: &Path) -> Result<Vec<DomainSummary>, AppError> {
    list::execute(&context(config_dir))
}

/// Run the scheduler until `shutdown` resolves.
pub async fn schedule_at<F>(
    config_dir: &Path,
    options: &ScheduleOptions,
    shutdown: F,
) -> Result<ScheduleOutcome, AppError>
where
    F: Future<Output = ()>,
{
    schedule::execute(&context(config_dir), options, shutdown).await
}

/// Write the starter configuration tree.
pub fn init_at(config_dir: &Path, force: bool) -> Result<InitOutcome, AppError> {
    init::execute(&context(config_dir), force)
}

/// Create a new per-domain document.
pub fn create_domain_at(config_dir: &Path, name: &str, tags: &[String]) -> Result<PathBuf, AppError> {
    create_domain::execute(&context(config_dir), name, tags)
}
