//! Domain pipeline callback seam.

use std::sync::Arc;

use crate::domain::{AppError, DomainConfig, Table};

use super::DatasetIo;

/// Failure reported by a domain pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Reading or writing a declared dataset failed.
    #[error(transparent)]
    Data(#[from] AppError),

    /// The pipeline's own logic rejected the run.
    #[error("{0}")]
    Failed(String),
}

impl PipelineError {
    pub fn failed(message: impl Into<String>) -> Self {
        PipelineError::Failed(message.into())
    }
}

/// Everything a pipeline sees for one execution.
pub struct PipelineContext {
    config: DomainConfig,
    io: Arc<dyn DatasetIo>,
}

impl PipelineContext {
    pub fn new(config: DomainConfig, io: Arc<dyn DatasetIo>) -> Self {
        Self { config, io }
    }

    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    pub fn domain(&self) -> &str {
        self.config.name.as_str()
    }

    /// Read the input declared under `key`.
    pub fn read(&self, key: &str) -> Result<Table, AppError> {
        self.io.read(self.config.input(key)?)
    }

    /// Write `table` to the output declared under `key`.
    pub fn write(&self, key: &str, table: &Table) -> Result<(), AppError> {
        self.io.write(table, self.config.output(key)?)
    }

    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.config.param(key)
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.param(key).and_then(|value| value.as_str())
    }
}

/// Business logic for one domain. Implementations must be safe to call from
/// several threads, since the scheduler may run different domains at once.
pub trait DomainPipeline: Send + Sync {
    fn run(&self, ctx: &PipelineContext) -> Result<(), PipelineError>;
}

impl<F> DomainPipeline for F
where
    F: Fn(&PipelineContext) -> Result<(), PipelineError> + Send + Sync,
{
    fn run(&self, ctx: &PipelineContext) -> Result<(), PipelineError> {
        self(ctx)
    }
}
