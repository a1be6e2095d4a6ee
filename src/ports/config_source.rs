//! Declarative configuration source operations.
//!
//! Documents are surfaced as `serde_json::Value` trees so composition can
//! merge them regardless of the on-disk format.

use std::path::PathBuf;

use crate::domain::AppError;

/// Port for reading and writing the layered configuration tree.
pub trait ConfigSource {
    /// Human-readable location used in messages (e.g. the config directory).
    fn origin(&self) -> String;

    /// Whether a global document exists.
    fn has_global_document(&self) -> bool;

    /// Parse the global document.
    ///
    /// Any error here is fatal to the invocation.
    fn global_document(&self) -> Result<serde_json::Value, AppError>;

    /// Names of every per-domain document, sorted.
    fn domain_names(&self) -> Result<Vec<String>, AppError>;

    /// Parse one per-domain document. `Ok(None)` when no document exists.
    fn domain_document(&self, name: &str) -> Result<Option<serde_json::Value>, AppError>;

    /// Write the global document, replacing any existing one.
    fn write_global_document(&self, content: &str) -> Result<PathBuf, AppError>;

    /// Write a per-domain document. Fails if one already exists.
    fn write_domain_document(&self, name: &str, content: &str) -> Result<PathBuf, AppError>;
}
