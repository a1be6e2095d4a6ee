//! Create-domain command implementation.

use std::io::{ErrorKind, IsTerminal};
use std::path::Path;

use dialoguer::{Error as DialoguerError, Input};

use crate::app::api;
use crate::domain::AppError;

pub fn run_create_domain(
    config_dir: &Path,
    name: Option<String>,
    tags: Vec<String>,
) -> Result<(), AppError> {
    let name = match name {
        Some(value) => value,
        None => match prompt_domain_name()? {
            Some(value) => value,
            None => return Ok(()),
        },
    };

    let path = api::create_domain_at(config_dir, &name, &tags)?;
    println!("✅ Created domain '{}' at {}", name, super::display(&path));
    Ok(())
}

fn prompt_domain_name() -> Result<Option<String>, AppError> {
    if !std::io::stdin().is_terminal() {
        return Err(AppError::config_error("Domain name is required"));
    }
    match Input::new().with_prompt("Domain name").interact_text() {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::config_error(format!("Failed to read domain name: {}", err))),
    }
}
