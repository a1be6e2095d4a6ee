use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::{CompositionError, ScheduleConfig};

use super::merge::merge_maps;

const PRESET_KEY: &str = "preset";

/// Resolve a domain's `schedule` value, expanding named presets, and check it.
pub fn resolve_schedule(
    domain: &str,
    value: Value,
    presets: &BTreeMap<String, Map<String, Value>>,
) -> Result<ScheduleConfig, CompositionError> {
    let table = match value {
        Value::Null => return Ok(ScheduleConfig::default()),
        Value::String(name) => lookup(domain, &name, presets, "schedule")?,
        Value::Object(mut overrides) => match overrides.remove(PRESET_KEY) {
            None => overrides,
            Some(Value::String(name)) => {
                let mut base = lookup(domain, &name, presets, "schedule.preset")?;
                merge_maps(&mut base, overrides);
                base
            }
            Some(_) => {
                return Err(CompositionError::new(domain, "preset must be a string")
                    .at("schedule.preset"));
            }
        },
        _ => {
            return Err(CompositionError::new(domain, "must be a preset name or a table")
                .at("schedule"));
        }
    };

    let schedule: ScheduleConfig = serde_json::from_value(Value::Object(table))
        .map_err(|err| CompositionError::new(domain, err.to_string()).at("schedule"))?;

    schedule.validate().map_err(|err| {
        let field = match err.field() {
            Some(field) => format!("schedule.{}", field),
            None => "schedule".to_string(),
        };
        CompositionError::new(domain, err.to_string()).at(field)
    })?;
    Ok(schedule)
}

fn lookup(
    domain: &str,
    name: &str,
    presets: &BTreeMap<String, Map<String, Value>>,
    field: &str,
) -> Result<Map<String, Value>, CompositionError> {
    presets.get(name).cloned().ok_or_else(|| {
        let available = if presets.is_empty() {
            "none".to_string()
        } else {
            presets.keys().cloned().collect::<Vec<_>>().join(", ")
        };
        CompositionError::new(
            domain,
            format!("unknown schedule preset '{}'. Available: {}", name, available),
        )
        .at(field)
    })
}
