//! Codecs that ship with the crate.

pub mod csv;
pub mod json;

use std::fs;
use std::path::PathBuf;

use crate::domain::{AppError, IoConfig};

/// Local path for a dataset, rejecting remote URIs.
fn local_path(config: &IoConfig) -> Result<PathBuf, AppError> {
    config.local_path().ok_or_else(|| {
        AppError::config_error(format!(
            "remote storage is not supported by the builtin {} codec",
            config.format
        ))
    })
}

/// Local path for an output, with its parent directory created.
fn prepare_output(config: &IoConfig) -> Result<PathBuf, AppError> {
    let path = local_path(config)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(path)
}
