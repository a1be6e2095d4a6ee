use std::path::PathBuf;

use crate::app::AppContext;
use crate::domain::{AppError, DomainName};
use crate::ports::ConfigSource;
use crate::services::scaffold_assets::render_domain_template;

/// Create `domains/<name>.toml` from the embedded template.
pub fn execute<S: ConfigSource>(
    ctx: &AppContext<S>,
    name: &str,
    tags: &[String],
) -> Result<PathBuf, AppError> {
    let name = DomainName::new(name)?;
    if !ctx.source().has_global_document() {
        return Err(AppError::ConfigDirNotFound(ctx.source().origin()));
    }
    if let Some(tag) = tags.iter().find(|tag| tag.trim().is_empty()) {
        return Err(AppError::config_error(format!("Invalid tag '{}'", tag)));
    }

    let content = render_domain_template(&display_name(name.as_str()), tags)?;
    ctx.source().write_domain_document(name.as_str(), &content)
}

/// `daily_sales-eu` -> `Daily Sales Eu`
fn display_name(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
