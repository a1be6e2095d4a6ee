//! Process-wide configuration loaded from the global document.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::io_config::IoConfig;
use crate::domain::AppError;

/// Top-level configuration. Read-only once composition starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    #[serde(default = "default_env")]
    pub env: String,
    /// Empty means no name filter.
    #[serde(default)]
    pub active_domains: BTreeSet<String>,
    /// Empty means no tag filter.
    #[serde(default)]
    pub active_tags: BTreeSet<String>,
    #[serde(default)]
    pub base_input_path: Option<String>,
    #[serde(default)]
    pub base_output_path: Option<String>,
    /// Explicit candidate list; overrides discovery when non-empty.
    #[serde(default)]
    pub domains_to_run: Vec<String>,
    /// Shared input definitions referenced by name from domains.
    #[serde(default)]
    pub inputs: BTreeMap<String, IoConfig>,
    /// Values merged under every domain definition.
    #[serde(default)]
    pub defaults: serde_json::Map<String, serde_json::Value>,
    /// Named schedule presets.
    #[serde(default)]
    pub schedules: BTreeMap<String, serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub batches: BTreeMap<String, BatchPreset>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    /// Inline domain definitions.
    #[serde(default)]
    pub domains: BTreeMap<String, serde_json::Map<String, serde_json::Value>>,
}

impl GlobalConfig {
    /// Replace the candidate list and tag filter with a named batch.
    pub fn apply_batch(&mut self, name: &str) -> Result<(), AppError> {
        let batch = self.batches.get(name).cloned().ok_or_else(|| AppError::UnknownBatch {
            name: name.to_string(),
            available: if self.batches.is_empty() {
                "none".to_string()
            } else {
                self.batches.keys().cloned().collect::<Vec<_>>().join(", ")
            },
        })?;
        self.domains_to_run = batch.domains;
        self.active_tags = batch.tags.into_iter().collect();
        Ok(())
    }
}

fn default_env() -> String {
    "dev".to_string()
}

/// Predefined `(domains_to_run, active_tags)` pair selectable by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchPreset {
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_true")]
    pub to_console: bool,
    #[serde(default)]
    pub to_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_dir: default_log_dir(),
            to_console: default_true(),
            to_file: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_true() -> bool {
    true
}

/// What the scheduler does when a domain's job fires while its previous
/// firing is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Drop the new firing and log a warning.
    #[default]
    Skip,
    /// Run the new firing after the previous one finishes.
    Queue,
    /// Run both at once.
    Concurrent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerSettings {
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
    /// Upper bound on waiting for in-flight firings during shutdown.
    #[serde(default = "default_drain_timeout_secs")]
    pub drain_timeout_secs: u64,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            overlap_policy: OverlapPolicy::default(),
            drain_timeout_secs: default_drain_timeout_secs(),
        }
    }
}

fn default_drain_timeout_secs() -> u64 {
    30
}
