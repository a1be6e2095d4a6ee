//! One-shot execution of an execution set.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use crate::domain::{AppError, DomainConfig, DomainOutcome, FailureKind, Outcome, RunReport};
use crate::ports::{DatasetIo, PipelineContext};
use crate::services::{IoRegistry, PipelineRegistry};

/// Runs domains through their registered pipelines, containing every
/// failure at the domain boundary.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    pipelines: Arc<PipelineRegistry>,
    io: Arc<IoRegistry>,
}

impl Orchestrator {
    pub fn new(pipelines: Arc<PipelineRegistry>, io: Arc<IoRegistry>) -> Self {
        Self { pipelines, io }
    }

    /// Run each domain in order. Never aborts early.
    pub fn run(&self, domains: &[&DomainConfig]) -> RunReport {
        let mut report = RunReport::new();
        for config in domains {
            report.push(self.run_domain(config));
        }
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            skipped = report.skipped(),
            "batch finished"
        );
        report
    }

    /// Report what `run` would attempt without invoking any pipeline.
    pub fn dry_run(&self, domains: &[&DomainConfig]) -> RunReport {
        let mut report = RunReport::new();
        for config in domains {
            let outcome = match self.pipelines.get(config.pipeline_key()) {
                Some(_) => Outcome::skipped(format!("dry run (pipeline '{}')", config.pipeline_key())),
                None => not_found(config),
            };
            report.record(config.name.as_str(), outcome, Default::default());
        }
        report
    }

    /// Execute a single domain. Shared by batch runs and scheduled firings.
    pub fn run_domain(&self, config: &DomainConfig) -> DomainOutcome {
        let span = tracing::info_span!("domain", domain = %config.name);
        let _entered = span.enter();
        let started = Instant::now();

        let outcome = self.execute(config);
        let duration = started.elapsed();
        match &outcome {
            Outcome::Succeeded => {
                tracing::info!(elapsed_ms = duration.as_millis() as u64, "domain succeeded")
            }
            Outcome::Failed { kind, reason } => {
                tracing::error!(kind = kind.label(), %reason, "domain failed")
            }
            Outcome::Skipped { reason } => tracing::info!(%reason, "domain skipped"),
        }

        DomainOutcome { domain: config.name.to_string(), outcome, duration }
    }

    fn execute(&self, config: &DomainConfig) -> Outcome {
        if !config.enabled {
            return Outcome::skipped("disabled");
        }

        let Some(pipeline) = self.pipelines.get(config.pipeline_key()) else {
            return not_found(config);
        };

        tracing::info!(pipeline = config.pipeline_key(), "running domain");
        let io: Arc<dyn DatasetIo> = self.io.clone();
        let ctx = PipelineContext::new(config.clone(), io);

        match panic::catch_unwind(AssertUnwindSafe(|| pipeline.run(&ctx))) {
            Ok(Ok(())) => Outcome::Succeeded,
            Ok(Err(err)) => Outcome::failed(FailureKind::Pipeline, err.to_string()),
            Err(payload) => Outcome::failed(FailureKind::Panic, panic_message(payload.as_ref())),
        }
    }
}

fn not_found(config: &DomainConfig) -> Outcome {
    let err = AppError::DomainNotFound {
        domain: config.name.to_string(),
        key: config.pipeline_key().to_string(),
    };
    Outcome::failed(FailureKind::DomainNotFound, err.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("pipeline panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("pipeline panicked: {}", message)
    } else {
        "pipeline panicked".to_string()
    }
}
