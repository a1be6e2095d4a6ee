//! Capability map from pipeline key to domain implementation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ports::{DomainPipeline, PipelineContext, PipelineError};

/// Key of the builtin pipeline that copies inputs to outputs.
pub const COPY_PIPELINE: &str = "copy";

/// Populated once at startup, then shared read-only.
#[derive(Clone, Default)]
pub struct PipelineRegistry {
    pipelines: HashMap<String, Arc<dyn DomainPipeline>>,
}

impl PipelineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_pipelines() -> Self {
        let mut registry = Self::new();
        registry.register_fn(COPY_PIPELINE, copy_pipeline);
        registry
    }

    /// Register a pipeline under `key`, replacing any previous one.
    pub fn register<P>(&mut self, key: impl Into<String>, pipeline: P)
    where
        P: DomainPipeline + 'static,
    {
        self.pipelines.insert(key.into(), Arc::new(pipeline));
    }

    pub fn register_fn<F>(&mut self, key: impl Into<String>, pipeline: F)
    where
        F: Fn(&PipelineContext) -> Result<(), PipelineError> + Send + Sync + 'static,
    {
        self.register(key, pipeline);
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn DomainPipeline>> {
        self.pipelines.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pipelines.contains_key(key)
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.pipelines.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl std::fmt::Debug for PipelineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRegistry").field("keys", &self.keys()).finish()
    }
}

/// Writes each output from the input of the same name, or from the only
/// input when there is exactly one.
fn copy_pipeline(ctx: &PipelineContext) -> Result<(), PipelineError> {
    let config = ctx.config();
    if config.outputs.is_empty() {
        return Err(PipelineError::failed("copy pipeline requires at least one output"));
    }

    for key in config.outputs.keys() {
        let source = if config.inputs.contains_key(key) {
            key.as_str()
        } else if config.inputs.len() == 1 {
            config.inputs.keys().next().map(String::as_str).unwrap_or(key)
        } else {
            return Err(PipelineError::failed(format!(
                "no input matches output '{}' and the domain has {} inputs",
                key,
                config.inputs.len()
            )));
        };

        let table = ctx.read(source)?;
        tracing::debug!(domain = ctx.domain(), source, output = %key, rows = table.len(), "copying dataset");
        ctx.write(key, &table)?;
    }
    Ok(())
}
