//! One-shot batch execution.

use std::time::Duration;

use crate::app::AppContext;
use crate::app::compose;
use crate::domain::selection::{select, skipped_disabled};
use crate::domain::{AppError, CompositionError, FailureKind, Outcome, RunReport, SelectionFilter};
use crate::ports::ConfigSource;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Replaces `active_domains` when non-empty.
    pub domains: Vec<String>,
    /// Replaces `active_tags` when non-empty.
    pub tags: Vec<String>,
    pub batch: Option<String>,
    pub dry_run: bool,
}

/// Compose, select and run. Only a fatal global configuration problem is
/// returned as an error; everything else lands in the report.
pub fn execute<S: ConfigSource>(
    ctx: &AppContext<S>,
    options: &RunOptions,
) -> Result<RunReport, AppError> {
    let composition = compose::compose(ctx.source(), ctx.io(), options.batch.as_deref())?;
    let filter = SelectionFilter::from_global(&composition.global)
        .with_overrides(&options.domains, &options.tags);
    let candidates: Vec<String> =
        composition.results.iter().map(|result| result.domain().to_string()).collect();
    let (domains, failures) = composition.partition();

    for requested in &filter.domains {
        let known = domains.iter().any(|d| d.name.as_str() == requested)
            || failures.iter().any(|f| &f.domain == requested);
        if !known {
            tracing::warn!(domain = %requested, "requested domain matches no definition");
        }
    }

    let mut report = RunReport::new();
    for failure in &failures {
        // Tags cannot be evaluated for a domain that failed to compose.
        if filter.domains.is_empty() || filter.domains.contains(&failure.domain) {
            report.record(
                failure.domain.clone(),
                Outcome::failed(FailureKind::Composition, failure_reason(failure)),
                Duration::ZERO,
            );
        }
    }
    for config in skipped_disabled(&domains, &filter) {
        tracing::info!(domain = %config.name, "skipping domain (disabled)");
        report.record(config.name.as_str(), Outcome::skipped("disabled"), Duration::ZERO);
    }

    let execution_set = select(&domains, &filter);
    if execution_set.is_empty() {
        tracing::warn!("no domains selected for execution");
    }

    let orchestrator = ctx.orchestrator();
    let executed = if options.dry_run {
        orchestrator.dry_run(&execution_set)
    } else {
        orchestrator.run(&execution_set)
    };
    report.entries.extend(executed.entries);

    // Entries were gathered per kind; present them in declaration order.
    report.entries.sort_by_key(|entry| {
        candidates.iter().position(|name| *name == entry.domain).unwrap_or(usize::MAX)
    });
    Ok(report)
}

fn failure_reason(failure: &CompositionError) -> String {
    match &failure.field {
        Some(field) => format!("{}: {}", field, failure.message),
        None => failure.message.clone(),
    }
}
