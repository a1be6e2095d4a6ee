//! List command implementation.

use std::path::Path;

use crate::app::api;
use crate::domain::AppError;

pub fn run_list(config_dir: &Path, json: bool) -> Result<(), AppError> {
    let summaries = api::list_at(config_dir)?;

    if json {
        let output = serde_json::to_string_pretty(&summaries)
            .map_err(|err| AppError::InternalError(format!("Failed to serialize list: {}", err)))?;
        println!("{}", output);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("⚠️  No domains defined in {}", super::display(config_dir));
        return Ok(());
    }

    for summary in &summaries {
        if let Some(error) = &summary.error {
            println!("✗ {}  (invalid: {})", summary.name, error);
            continue;
        }
        let state = if summary.enabled { "enabled" } else { "disabled" };
        let tags = if summary.tags.is_empty() { "-".to_string() } else { summary.tags.join(",") };
        let schedule = match (&summary.trigger, &summary.next_run) {
            (Some(trigger), Some(next)) => format!("{} (next {})", trigger, next),
            (Some(trigger), None) => trigger.clone(),
            _ => "unscheduled".to_string(),
        };
        println!("• {}  [{}]  tags: {}  schedule: {}", summary.name, state, tags, schedule);
    }
    Ok(())
}
