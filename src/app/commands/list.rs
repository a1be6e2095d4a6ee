//! Inventory of composed domains.

use chrono::Local;
use serde::Serialize;

use crate::app::AppContext;
use crate::app::compose;
use crate::domain::schedule::translate;
use crate::domain::{AppError, LoadResult};
use crate::ports::ConfigSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub enabled: bool,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,
    /// Normalized cron expression of an enabled schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_run: Option<String>,
    /// Composition failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn execute<S: ConfigSource>(ctx: &AppContext<S>) -> Result<Vec<DomainSummary>, AppError> {
    let composition = compose::compose(ctx.source(), ctx.io(), None)?;
    let now = Local::now();

    Ok(composition
        .results
        .iter()
        .map(|result| match result {
            LoadResult::Success(config) => {
                let trigger = if config.schedule.enabled { translate(&config.schedule).ok() } else { None };
                DomainSummary {
                    name: config.name.to_string(),
                    display_name: Some(config.display_name.clone()),
                    enabled: config.enabled,
                    tags: config.tags.iter().cloned().collect(),
                    pipeline: Some(config.pipeline_key().to_string()),
                    next_run: trigger
                        .as_ref()
                        .and_then(|t| t.next_after(&now))
                        .map(|at| at.format("%Y-%m-%d %H:%M").to_string()),
                    trigger: trigger.map(|t| t.to_cron_string()),
                    error: None,
                }
            }
            LoadResult::Failure(err) => DomainSummary {
                name: err.domain.clone(),
                display_name: None,
                enabled: false,
                tags: Vec::new(),
                pipeline: None,
                trigger: None,
                next_run: None,
                error: Some(err.to_string()),
            },
        })
        .collect())
}
