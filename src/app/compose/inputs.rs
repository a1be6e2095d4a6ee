//! Resolution of input and output declarations into concrete `IoConfig`s.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::domain::io_config::is_uri;
use crate::domain::{AppError, CompositionError, IoConfig};

use super::merge::deep_merge;

/// Key on an inline input table that names the shared input it extends.
const SHARED_KEY: &str = "shared";

/// Resolve a domain's `inputs` value against the shared input table.
///
/// Accepted shapes:
/// - `["customers", "orders"]`: shared inputs by name
/// - `{ orders = "orders_v2" }`: local key bound to a shared input
/// - `{ orders = { path = "...", format = "csv" } }`: inline definition
/// - `{ orders = { shared = "orders_v2", options = {...} } }`: shared input with overrides
///
/// Every unknown shared name is reported in a single error.
pub fn resolve_inputs(
    domain: &str,
    value: Value,
    shared: &BTreeMap<String, IoConfig>,
) -> Result<BTreeMap<String, IoConfig>, CompositionError> {
    let mut resolved = BTreeMap::new();
    let mut missing = Vec::new();

    match value {
        Value::Null => {}
        Value::Array(names) => {
            for (index, entry) in names.into_iter().enumerate() {
                let Value::String(name) = entry else {
                    return Err(CompositionError::new(domain, "shared input names must be strings")
                        .at(format!("inputs[{}]", index)));
                };
                match shared.get(&name) {
                    Some(config) => {
                        resolved.insert(name, config.clone());
                    }
                    None => missing.push(name),
                }
            }
        }
        Value::Object(entries) => {
            for (key, entry) in entries {
                let field = format!("inputs.{}", key);
                match entry {
                    Value::String(name) => match shared.get(&name) {
                        Some(config) => {
                            resolved.insert(key, config.clone());
                        }
                        None => missing.push(name),
                    },
                    Value::Object(mut table) => {
                        let base = match table.remove(SHARED_KEY) {
                            None => None,
                            Some(Value::String(name)) => match shared.get(&name) {
                                Some(config) => Some(config),
                                None => {
                                    missing.push(name);
                                    continue;
                                }
                            },
                            Some(_) => {
                                return Err(CompositionError::new(domain, "must be a shared input name")
                                    .at(format!("{}.{}", field, SHARED_KEY)));
                            }
                        };
                        let merged = match base {
                            Some(config) => {
                                let mut merged = serde_json::to_value(config).map_err(|err| {
                                    CompositionError::new(domain, err.to_string()).at(&field)
                                })?;
                                deep_merge(&mut merged, Value::Object(table));
                                merged
                            }
                            None => Value::Object(table),
                        };
                        resolved.insert(key, parse_io(domain, &field, merged)?);
                    }
                    _ => {
                        return Err(CompositionError::new(
                            domain,
                            "must be a shared input name or an IO table",
                        )
                        .at(field));
                    }
                }
            }
        }
        _ => {
            return Err(CompositionError::new(
                domain,
                "must be a list of shared input names or a table",
            )
            .at("inputs"));
        }
    }

    if !missing.is_empty() {
        missing.sort();
        missing.dedup();
        let err = AppError::UnresolvedInputReference { domain: domain.to_string(), missing };
        return Err(CompositionError::new(domain, err.to_string()).at("inputs"));
    }
    Ok(resolved)
}

/// Parse a domain's `outputs` table. Outputs have no shared form.
pub fn resolve_outputs(
    domain: &str,
    value: Value,
) -> Result<BTreeMap<String, IoConfig>, CompositionError> {
    match value {
        Value::Null => Ok(BTreeMap::new()),
        Value::Object(entries) => entries
            .into_iter()
            .map(|(key, entry)| {
                let config = parse_io(domain, &format!("outputs.{}", key), entry)?;
                Ok((key, config))
            })
            .collect(),
        _ => Err(CompositionError::new(domain, "must be a table of IO definitions").at("outputs")),
    }
}

fn parse_io(domain: &str, field: &str, value: Value) -> Result<IoConfig, CompositionError> {
    serde_json::from_value(value).map_err(|err| CompositionError::new(domain, err.to_string()).at(field))
}

/// Prefix relative paths with `base`. Absolute paths and URIs are left alone.
pub fn apply_base_path(base: Option<&str>, configs: &mut BTreeMap<String, IoConfig>) {
    let Some(base) = base.filter(|base| !base.is_empty()) else {
        return;
    };
    for config in configs.values_mut() {
        if is_uri(&config.path) || Path::new(&config.path).is_absolute() {
            continue;
        }
        config.path = if is_uri(base) {
            format!("{}/{}", base.trim_end_matches('/'), config.path)
        } else {
            Path::new(base).join(&config.path).to_string_lossy().into_owned()
        };
    }
}
