use std::sync::Arc;

use crate::app::orchestrator::Orchestrator;
use crate::ports::ConfigSource;
use crate::services::{IoRegistry, PipelineRegistry};

/// Application context holding dependencies for command execution.
pub struct AppContext<S: ConfigSource> {
    source: S,
    io: Arc<IoRegistry>,
    pipelines: Arc<PipelineRegistry>,
}

impl<S: ConfigSource> AppContext<S> {
    pub fn new(source: S, io: IoRegistry, pipelines: PipelineRegistry) -> Self {
        Self { source, io: Arc::new(io), pipelines: Arc::new(pipelines) }
    }

    /// Context with the builtin CSV/JSON codecs and the `copy` pipeline.
    pub fn with_builtins(source: S) -> Self {
        Self::new(source, IoRegistry::with_builtin_codecs(), PipelineRegistry::with_builtin_pipelines())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn io(&self) -> &IoRegistry {
        &self.io
    }

    pub fn pipelines(&self) -> &PipelineRegistry {
        &self.pipelines
    }

    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(Arc::clone(&self.pipelines), Arc::clone(&self.io))
    }
}
