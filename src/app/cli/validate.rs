//! Validate command implementation.

use std::path::Path;

use crate::app::api;
use crate::domain::AppError;

pub fn run_validate(config_dir: &Path) -> Result<i32, AppError> {
    let outcome = api::validate_at(config_dir)?;

    for failure in &outcome.failures {
        println!("✗ {}", failure);
    }
    for (domain, pipeline) in &outcome.unregistered {
        println!("⚠️  {}: no pipeline registered under '{}'", domain, pipeline);
    }

    if outcome.failures.is_empty() {
        println!("✅ {} domain(s) valid", outcome.valid.len());
    } else {
        println!(
            "⚠️  {} domain(s) valid, {} invalid",
            outcome.valid.len(),
            outcome.failures.len()
        );
    }
    Ok(outcome.exit_code)
}
