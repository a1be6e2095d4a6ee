//! Validated per-domain configuration.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::identifiers::DomainName;
use crate::domain::io_config::IoConfig;
use crate::domain::schedule::ScheduleConfig;
use crate::domain::AppError;

/// Configuration for a single domain, produced by composition and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainConfig {
    pub name: DomainName,
    pub display_name: String,
    pub enabled: bool,
    pub tags: BTreeSet<String>,
    pub inputs: BTreeMap<String, IoConfig>,
    pub outputs: BTreeMap<String, IoConfig>,
    pub params: BTreeMap<String, serde_json::Value>,
    pub schedule: ScheduleConfig,
    /// Pipeline registry key; defaults to the domain name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,
}

impl DomainConfig {
    /// Minimal enabled domain with no IO, mostly useful for tests and tooling.
    pub fn new(name: DomainName) -> Self {
        Self {
            display_name: name.to_string(),
            name,
            enabled: true,
            tags: BTreeSet::new(),
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
            params: BTreeMap::new(),
            schedule: ScheduleConfig::default(),
            pipeline: None,
        }
    }

    pub fn pipeline_key(&self) -> &str {
        self.pipeline.as_deref().unwrap_or(self.name.as_str())
    }

    pub fn has_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag))
    }

    pub fn input(&self, key: &str) -> Result<&IoConfig, AppError> {
        self.inputs.get(key).ok_or_else(|| self.missing_key(key))
    }

    pub fn output(&self, key: &str) -> Result<&IoConfig, AppError> {
        self.outputs.get(key).ok_or_else(|| self.missing_key(key))
    }

    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.params.get(key)
    }

    fn missing_key(&self, key: &str) -> AppError {
        AppError::MissingIoKey {
            domain: self.name.to_string(),
            key: key.to_string(),
            inputs: self.inputs.keys().cloned().collect(),
            outputs: self.outputs.keys().cloned().collect(),
        }
    }
}
