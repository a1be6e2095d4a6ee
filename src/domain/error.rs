use std::io;

use thiserror::Error;

use crate::domain::schedule::ScheduleError;

/// Library-wide error type for dataflow operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Config directory does not exist.
    #[error("Config directory not found: {0}. Run 'dataflow init' first.")]
    ConfigDirNotFound(String),

    /// Config directory already holds a global config document.
    #[error("Config already exists at {0}. Use --force to overwrite.")]
    ConfigExists(String),

    /// The global config document is missing or structurally invalid.
    #[error("Invalid global config ({origin}): {details}")]
    GlobalConfig { origin: String, details: String },

    /// Domain name is not a valid identifier.
    #[error("Invalid domain name '{0}': must be alphanumeric with hyphens or underscores")]
    InvalidDomainName(String),

    /// A domain references shared inputs that are not defined.
    #[error("Domain '{domain}' references unknown inputs: {}", .missing.join(", "))]
    UnresolvedInputReference { domain: String, missing: Vec<String> },

    /// No codec is registered for a format.
    #[error("No codec registered for format '{format}'")]
    UnsupportedFormat { format: String },

    /// Schedule declaration cannot be turned into a trigger.
    #[error(transparent)]
    InvalidSchedule(#[from] ScheduleError),

    /// No pipeline implementation registered for a selected domain.
    #[error("No pipeline registered for domain '{domain}' (looked up '{key}')")]
    DomainNotFound { domain: String, key: String },

    /// Pipeline callback reported a failure.
    #[error("Domain '{domain}' execution failed: {details}")]
    PipelineExecution { domain: String, details: String },

    /// A scheduled job could not be registered.
    #[error("Failed to schedule domain '{domain}': {details}")]
    SchedulerRegistration { domain: String, details: String },

    /// Batch preset not present in the global config.
    #[error("Batch '{name}' not found. Available: {available}")]
    UnknownBatch { name: String, available: String },

    /// Domain asked for an input or output key it does not declare.
    #[error(
        "{domain}: unknown IO key '{key}'. Inputs: {}. Outputs: {}.",
        display_keys(.inputs),
        display_keys(.outputs)
    )]
    MissingIoKey { domain: String, key: String, inputs: Vec<String>, outputs: Vec<String> },

    /// Reading a dataset failed.
    #[error("Failed to read dataset | path={path} | format={format}: {details}")]
    IoRead { path: String, format: String, details: String },

    /// Writing a dataset failed.
    #[error("Failed to write dataset | path={path} | format={format}: {details}")]
    IoWrite { path: String, format: String, details: String },

    /// Domain definition already exists.
    #[error("Domain '{0}' already exists")]
    DomainExists(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Internal failure that should not happen in a healthy installation.
    #[error("Internal error: {0}")]
    InternalError(String),
}

fn display_keys(keys: &[String]) -> String {
    if keys.is_empty() { "none".to_string() } else { keys.join(", ") }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::GlobalConfig { .. }
            | AppError::InvalidDomainName(_)
            | AppError::UnresolvedInputReference { .. }
            | AppError::UnsupportedFormat { .. }
            | AppError::InvalidSchedule(_)
            | AppError::MissingIoKey { .. }
            | AppError::ParseError { .. } => io::ErrorKind::InvalidInput,
            AppError::ConfigDirNotFound(_)
            | AppError::DomainNotFound { .. }
            | AppError::UnknownBatch { .. } => io::ErrorKind::NotFound,
            AppError::ConfigExists(_) | AppError::DomainExists(_) => io::ErrorKind::AlreadyExists,
            AppError::PipelineExecution { .. }
            | AppError::SchedulerRegistration { .. }
            | AppError::IoRead { .. }
            | AppError::IoWrite { .. }
            | AppError::InternalError(_) => io::ErrorKind::Other,
        }
    }
}
