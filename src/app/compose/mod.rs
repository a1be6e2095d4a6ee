//! Layered configuration composition.
//!
//! Every candidate domain yields exactly one `LoadResult`. Only problems
//! with the global document are returned as errors.

mod inputs;
mod merge;
mod schedule;

use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::{
    AppError, Composition, CompositionError, DomainConfig, DomainName, GlobalConfig, IoConfig,
    LoadResult,
};
use crate::ports::ConfigSource;
use crate::services::IoRegistry;

pub use merge::deep_merge;

/// Keys a domain definition may carry.
const DOMAIN_KEYS: [&str; 8] =
    ["display_name", "enabled", "tags", "inputs", "outputs", "params", "schedule", "pipeline"];

/// Load and validate the global document.
pub fn load_global<S: ConfigSource>(source: &S) -> Result<GlobalConfig, AppError> {
    let document = source.global_document()?;
    serde_json::from_value(document)
        .map_err(|err| AppError::GlobalConfig { origin: source.origin(), details: err.to_string() })
}

/// Compose every candidate domain.
///
/// `batch` selects a batch preset, replacing `domains_to_run` and
/// `active_tags` before candidates are determined.
pub fn compose<S: ConfigSource>(
    source: &S,
    io: &IoRegistry,
    batch: Option<&str>,
) -> Result<Composition, AppError> {
    let mut global = load_global(source)?;
    if let Some(batch) = batch {
        global.apply_batch(batch)?;
    }

    let candidates = candidates(source, &global)?;
    for name in &global.active_domains {
        if !candidates.contains(name) {
            tracing::warn!(domain = %name, "active_domains entry matches no known domain");
        }
    }

    let results = candidates
        .iter()
        .map(|name| match compose_domain(source, io, &global, name) {
            Ok(config) => {
                tracing::debug!(domain = %name, "composed domain configuration");
                LoadResult::Success(config)
            }
            Err(err) => {
                tracing::warn!(domain = %name, error = %err, "domain configuration failed");
                LoadResult::Failure(err)
            }
        })
        .collect();

    Ok(Composition { global, results })
}

/// Explicit `domains_to_run` (in listed order, first occurrence wins), or
/// the sorted union of inline and document-backed domains.
fn candidates<S: ConfigSource>(source: &S, global: &GlobalConfig) -> Result<Vec<String>, AppError> {
    if !global.domains_to_run.is_empty() {
        let mut seen = BTreeSet::new();
        return Ok(global
            .domains_to_run
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect());
    }

    let mut names: BTreeSet<String> = global.domains.keys().cloned().collect();
    names.extend(source.domain_names()?);
    Ok(names.into_iter().collect())
}

/// Compose one domain. Any failure is captured with its field path.
pub fn compose_domain<S: ConfigSource>(
    source: &S,
    io: &IoRegistry,
    global: &GlobalConfig,
    name: &str,
) -> Result<DomainConfig, CompositionError> {
    let domain_name =
        DomainName::new(name).map_err(|err| CompositionError::new(name, err.to_string()).at("name"))?;

    let inline = global.domains.get(name).cloned();
    let document = source
        .domain_document(name)
        .map_err(|err| CompositionError::new(name, err.to_string()))?;
    if inline.is_none() && document.is_none() {
        return Err(CompositionError::new(name, "domain definition not found"));
    }

    let mut merged = Value::Object(global.defaults.clone());
    if let Some(inline) = inline {
        deep_merge(&mut merged, Value::Object(inline));
    }
    if let Some(document) = document {
        if !document.is_object() {
            return Err(CompositionError::new(name, "domain document must be a table"));
        }
        deep_merge(&mut merged, document);
    }
    let Value::Object(mut table) = merged else {
        return Err(CompositionError::new(name, "domain definition must be a table"));
    };

    if let Some(unknown) = table.keys().find(|key| !DOMAIN_KEYS.contains(&key.as_str())) {
        return Err(CompositionError::new(name, format!("unknown field '{}'", unknown)).at(unknown.as_str()));
    }

    let display_name: Option<String> = section(name, &mut table, "display_name")?;
    let enabled: Option<bool> = section(name, &mut table, "enabled")?;
    let tags: Option<Vec<String>> = section(name, &mut table, "tags")?;
    let pipeline: Option<String> = section(name, &mut table, "pipeline")?;
    let params: Option<BTreeMap<String, Value>> = section(name, &mut table, "params")?;

    let tags: BTreeSet<String> = tags.unwrap_or_default().into_iter().collect();
    if tags.iter().any(|tag| tag.trim().is_empty()) {
        return Err(CompositionError::new(name, "tags must be non-empty strings").at("tags"));
    }

    let mut inputs = inputs::resolve_inputs(
        name,
        table.remove("inputs").unwrap_or(Value::Null),
        &global.inputs,
    )?;
    let mut outputs =
        inputs::resolve_outputs(name, table.remove("outputs").unwrap_or(Value::Null))?;
    check_formats(name, io, "inputs", &inputs)?;
    check_formats(name, io, "outputs", &outputs)?;
    inputs::apply_base_path(global.base_input_path.as_deref(), &mut inputs);
    inputs::apply_base_path(global.base_output_path.as_deref(), &mut outputs);

    let schedule = schedule::resolve_schedule(
        name,
        table.remove("schedule").unwrap_or(Value::Null),
        &global.schedules,
    )?;

    Ok(DomainConfig {
        display_name: display_name.unwrap_or_else(|| name.to_string()),
        name: domain_name,
        enabled: enabled.unwrap_or(true),
        tags,
        inputs,
        outputs,
        params: params.unwrap_or_default(),
        schedule,
        pipeline,
    })
}

/// Deserialize one optional top-level key, reporting failures at that key.
fn section<T: DeserializeOwned>(
    domain: &str,
    table: &mut Map<String, Value>,
    key: &str,
) -> Result<Option<T>, CompositionError> {
    match table.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|err| CompositionError::new(domain, err.to_string()).at(key)),
    }
}

fn check_formats(
    domain: &str,
    io: &IoRegistry,
    section: &str,
    configs: &BTreeMap<String, IoConfig>,
) -> Result<(), CompositionError> {
    for (key, config) in configs {
        if let Err(err) = io.resolve(config.format) {
            return Err(CompositionError::new(domain, err.to_string())
                .at(format!("{}.{}.format", section, key)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileFormat, Interval};
    use crate::testing::MemoryConfigSource;
    use serde_json::json;

    fn io() -> IoRegistry {
        IoRegistry::with_builtin_codecs()
    }

    fn base_source() -> MemoryConfigSource {
        MemoryConfigSource::new(json!({
            "base_input_path": "data/in",
            "base_output_path": "data/out",
            "inputs": {"customers": {"path": "customers.csv", "format": "csv"}},
            "defaults": {"tags": ["default"], "params": {"region": "eu"}},
            "schedules": {"nightly": {"enabled": true, "interval": "daily", "hour": 2}},
            "batches": {"nightly": {"domains": ["b"], "tags": ["critical"]}},
        }))
    }

    fn names(results: &[LoadResult]) -> Vec<&str> {
        results.iter().map(LoadResult::domain).collect()
    }

    #[test]
    fn layers_defaults_shared_inputs_and_overrides() {
        let source = base_source().with_domain(
            "sales",
            json!({
                "tags": ["daily"],
                "inputs": ["customers"],
                "outputs": {"report": {"path": "report.json", "format": "json"}},
                "params": {"threshold": 5},
                "schedule": "nightly",
            }),
        );
        let composition = compose(&source, &io(), None).unwrap();
        let LoadResult::Success(config) = &composition.results[0] else {
            panic!("expected success: {:?}", composition.results[0]);
        };

        assert_eq!(config.display_name, "sales");
        assert!(config.enabled);
        assert_eq!(config.tags, BTreeSet::from(["daily".to_string()]));
        assert_eq!(config.inputs["customers"].path, "data/in/customers.csv");
        assert_eq!(config.outputs["report"].path, "data/out/report.json");
        assert_eq!(config.params["region"], json!("eu"));
        assert_eq!(config.params["threshold"], json!(5));
        assert_eq!(config.schedule.interval, Interval::Daily);
    }

    #[test]
    fn document_overrides_inline_definition() {
        let mut global = base_source().global;
        global["domains"] = json!({"sales": {"enabled": false, "display_name": "Inline"}});
        let source = MemoryConfigSource::new(global).with_domain("sales", json!({"enabled": true}));

        let composition = compose(&source, &io(), None).unwrap();
        let config = composition.successes().next().unwrap();
        assert!(config.enabled);
        assert_eq!(config.display_name, "Inline");
    }

    #[test]
    fn k_failures_out_of_n_keep_candidate_order() {
        let source = base_source()
            .with_domain("a", json!({}))
            .with_domain("b", json!({"inputs": ["ghost"]}))
            .with_domain("c", json!({"outputs": {"x": {"path": "x.parquet", "format": "parquet"}}}))
            .with_domain("d", json!({"schedule": {"enabled": true, "interval": "daily", "hour": 24}}))
            .with_broken_domain("e", "expected `=`")
            .with_domain("f", json!({"tags": ["ok"]}));

        let composition = compose(&source, &io(), None).unwrap();
        assert_eq!(names(&composition.results), vec!["a", "b", "c", "d", "e", "f"]);

        let failures: Vec<_> = composition.failures().collect();
        let failed: Vec<&str> = failures.iter().map(|f| f.domain.as_str()).collect();
        assert_eq!(failed, vec!["b", "c", "d", "e"]);
        assert_eq!(failures[0].field.as_deref(), Some("inputs"));
        assert_eq!(failures[1].field.as_deref(), Some("outputs.x.format"));
        assert_eq!(failures[2].field.as_deref(), Some("schedule.hour"));
        assert!(failures[3].message.contains("expected `=`"));
        assert_eq!(composition.successes().count(), 2);
    }

    #[test]
    fn composing_twice_is_identical() {
        let source = base_source()
            .with_domain("a", json!({"inputs": ["customers"]}))
            .with_domain("b", json!({"inputs": ["ghost", "phantom"]}));
        let first = compose(&source, &io(), None).unwrap();
        let second = compose(&source, &io(), None).unwrap();
        assert_eq!(first.results, second.results);
    }

    #[test]
    fn domains_to_run_overrides_discovery() {
        let mut global = base_source().global;
        global["domains_to_run"] = json!(["c", "a", "c", "missing"]);
        let source = MemoryConfigSource::new(global)
            .with_domain("a", json!({}))
            .with_domain("b", json!({}))
            .with_domain("c", json!({}));

        let composition = compose(&source, &io(), None).unwrap();
        assert_eq!(names(&composition.results), vec!["c", "a", "missing"]);
        let missing = composition.failures().next().unwrap();
        assert_eq!(missing.message, "domain definition not found");
    }

    #[test]
    fn batch_replaces_candidates_and_tags() {
        let source = base_source().with_domain("a", json!({})).with_domain("b", json!({}));
        let composition = compose(&source, &io(), Some("nightly")).unwrap();
        assert_eq!(names(&composition.results), vec!["b"]);
        assert_eq!(composition.global.active_tags, BTreeSet::from(["critical".to_string()]));

        let err = compose(&source, &io(), Some("weekly")).unwrap_err();
        assert!(matches!(err, AppError::UnknownBatch { .. }));
    }

    #[test]
    fn invalid_global_document_is_fatal() {
        let source = MemoryConfigSource::new(json!({"active_tags": "daily"}));
        assert!(matches!(compose(&source, &io(), None), Err(AppError::GlobalConfig { .. })));

        let source = MemoryConfigSource::new(json!({"surprise": true}));
        assert!(matches!(compose(&source, &io(), None), Err(AppError::GlobalConfig { .. })));
    }

    #[test]
    fn unknown_domain_keys_and_bad_names_fail_per_domain() {
        let source = base_source()
            .with_domain("typo", json!({"enabeld": true}))
            .with_domain("bad name", json!({}));
        let composition = compose(&source, &io(), None).unwrap();
        let failures: Vec<_> = composition.failures().collect();
        assert_eq!(failures[0].domain, "bad name");
        assert_eq!(failures[0].field.as_deref(), Some("name"));
        assert_eq!(failures[1].field.as_deref(), Some("enabeld"));
    }

    #[test]
    fn wrong_section_type_names_the_section() {
        let source = base_source().with_domain("a", json!({"enabled": "yes"}));
        let composition = compose(&source, &io(), None).unwrap();
        let failure = composition.failures().next().unwrap();
        assert_eq!(failure.field.as_deref(), Some("enabled"));
    }

    #[test]
    fn registered_custom_format_is_accepted() {
        let mut registry = io();
        registry.register(FileFormat::Parquet, |_| Ok(Default::default()), |_, _| Ok(()));
        let source = base_source()
            .with_domain("c", json!({"outputs": {"x": {"path": "x.parquet", "format": "parquet"}}}));
        let composition = compose(&source, &registry, None).unwrap();
        assert!(composition.results[0].is_success());
    }
}
