//! Perpetual scheduled execution until a shutdown signal.

use std::future::Future;
use std::time::Duration;

use crate::app::AppContext;
use crate::app::compose;
use crate::app::scheduler::{DrainReport, SchedulerRunner};
use crate::domain::selection::select;
use crate::domain::{AppError, SelectionFilter};
use crate::ports::ConfigSource;

#[derive(Debug, Clone, Default)]
pub struct ScheduleOptions {
    /// Overrides `[scheduler] drain_timeout_secs`.
    pub drain_timeout: Option<Duration>,
    /// Fire every registered job once before waiting for triggers.
    pub run_now: bool,
}

#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    pub registered: Vec<String>,
    pub composition_failures: usize,
    pub registration_failures: usize,
    pub drain: DrainReport,
}

/// Build the runner from the composed configuration and block until
/// `shutdown` resolves. Must run inside a tokio runtime.
pub async fn execute<S, F>(
    ctx: &AppContext<S>,
    options: &ScheduleOptions,
    shutdown: F,
) -> Result<ScheduleOutcome, AppError>
where
    S: ConfigSource,
    F: Future<Output = ()>,
{
    let composition = compose::compose(ctx.source(), ctx.io(), None)?;
    let filter = SelectionFilter::from_global(&composition.global);
    let settings = composition.global.scheduler.clone();
    let (domains, failures) = composition.partition();
    for failure in &failures {
        tracing::warn!(domain = %failure.domain, error = %failure, "not scheduled: configuration failed");
    }

    let runner = SchedulerRunner::new(ctx.orchestrator(), settings.overlap_policy);
    let errors = runner.build(select(&domains, &filter));
    let registered = runner.job_names();

    if options.run_now {
        for name in &registered {
            runner.trigger_now(name)?;
        }
    }
    for name in &registered {
        if let Some(next) = runner.next_fire(name) {
            tracing::info!(domain = %name, next = %next.format("%Y-%m-%d %H:%M"), "next run");
        }
    }

    let timeout = options.drain_timeout.unwrap_or(Duration::from_secs(settings.drain_timeout_secs));
    let drain = runner.run_until(shutdown, timeout).await;

    Ok(ScheduleOutcome {
        registered,
        composition_failures: failures.len(),
        registration_failures: errors.len(),
        drain,
    })
}
