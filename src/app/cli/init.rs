//! Init command implementation.

use std::path::Path;

use crate::app::api;
use crate::domain::AppError;

pub fn run_init(config_dir: &Path, force: bool) -> Result<(), AppError> {
    let outcome = api::init_at(config_dir, force)?;
    println!("✅ Initialized configuration at {}/", super::display(config_dir));
    for path in &outcome.written {
        println!("  Wrote {}", super::display(path));
    }
    for name in &outcome.kept {
        println!("  Kept existing domain '{}'", name);
    }
    Ok(())
}
