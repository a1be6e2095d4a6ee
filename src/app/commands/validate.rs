//! Composition check without execution.

use crate::app::AppContext;
use crate::app::compose;
use crate::domain::{AppError, CompositionError};
use crate::ports::ConfigSource;

#[derive(Debug, Clone)]
pub struct ValidateOutcome {
    /// Domains that composed cleanly, in candidate order.
    pub valid: Vec<String>,
    pub failures: Vec<CompositionError>,
    /// `(domain, pipeline key)` pairs with no registered pipeline.
    pub unregistered: Vec<(String, String)>,
    pub exit_code: i32,
}

pub fn execute<S: ConfigSource>(ctx: &AppContext<S>) -> Result<ValidateOutcome, AppError> {
    let composition = compose::compose(ctx.source(), ctx.io(), None)?;
    let (domains, failures) = composition.partition();

    let unregistered = domains
        .iter()
        .filter(|config| !ctx.pipelines().contains(config.pipeline_key()))
        .map(|config| (config.name.to_string(), config.pipeline_key().to_string()))
        .collect();

    Ok(ValidateOutcome {
        valid: domains.iter().map(|config| config.name.to_string()).collect(),
        exit_code: if failures.is_empty() { 0 } else { 1 },
        failures,
        unregistered,
    })
}
