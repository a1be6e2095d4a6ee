use std::path::PathBuf;

use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::ConfigSource;
use crate::services::scaffold_assets::scaffold_files;
use crate::services::{DOMAINS_DIR, GLOBAL_STEM};

#[derive(Debug, Clone, Default)]
pub struct InitOutcome {
    pub written: Vec<PathBuf>,
    /// Domain documents left untouched because they already existed.
    pub kept: Vec<String>,
}

/// Write the starter configuration tree.
///
/// Without `force` an existing global document is an error. With `force`
/// the global document is replaced but existing domain documents are kept.
pub fn execute<S: ConfigSource>(ctx: &AppContext<S>, force: bool) -> Result<InitOutcome, AppError> {
    if ctx.source().has_global_document() && !force {
        return Err(AppError::ConfigExists(ctx.source().origin()));
    }

    let owner = std::env::var("USER").unwrap_or_else(|_| "data-team".to_string());
    let mut outcome = InitOutcome::default();
    let global_file = format!("{}.toml", GLOBAL_STEM);

    for file in scaffold_files("dev", &owner)? {
        if file.path == global_file {
            outcome.written.push(ctx.source().write_global_document(&file.content)?);
            continue;
        }

        let Some(name) = file
            .path
            .strip_prefix(DOMAINS_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.strip_suffix(".toml"))
        else {
            return Err(AppError::InternalError(format!("Unexpected scaffold file: {}", file.path)));
        };
        match ctx.source().write_domain_document(name, &file.content) {
            Ok(path) => outcome.written.push(path),
            Err(AppError::DomainExists(_)) if force => outcome.kept.push(name.to_string()),
            Err(err) => return Err(err),
        }
    }

    Ok(outcome)
}
