//! Run command implementation.

use std::path::Path;

use crate::app::api::{self, RunOptions};
use crate::domain::AppError;

pub fn run_domains(config_dir: &Path, options: &RunOptions) -> Result<i32, AppError> {
    let report = api::run_at(config_dir, options)?;

    if report.entries.is_empty() {
        println!("⚠️  No domains selected");
        return Ok(0);
    }

    print!("{}", report.render_table());
    if options.dry_run {
        println!("✅ Dry run complete; no pipelines were invoked");
    } else if report.is_success() {
        println!("✅ All selected domains completed");
    } else {
        println!("⚠️  {} domain(s) failed", report.failed());
    }
    Ok(report.exit_code())
}
