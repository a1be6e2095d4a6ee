use std::fmt;

use serde::Serialize;

use super::domain_config::DomainConfig;
use super::global_config::GlobalConfig;

/// A captured per-domain composition failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionError {
    pub domain: String,
    /// Dotted path of the offending field, when known (e.g. `schedule.hour`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl CompositionError {
    pub fn new(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self { domain: domain.into(), field: None, message: message.into() }
    }

    pub fn at(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} [{}]: {}", self.domain, field, self.message),
            None => write!(f, "{}: {}", self.domain, self.message),
        }
    }
}

/// Outcome of composing one candidate domain.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult {
    Success(DomainConfig),
    Failure(CompositionError),
}

impl LoadResult {
    pub fn domain(&self) -> &str {
        match self {
            LoadResult::Success(config) => config.name.as_str(),
            LoadResult::Failure(error) => &error.domain,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoadResult::Success(_))
    }
}

/// Everything composition produced for one invocation.
#[derive(Debug, Clone)]
pub struct Composition {
    pub global: GlobalConfig,
    /// One entry per candidate, in candidate order.
    pub results: Vec<LoadResult>,
}

impl Composition {
    pub fn successes(&self) -> impl Iterator<Item = &DomainConfig> {
        self.results.iter().filter_map(|result| match result {
            LoadResult::Success(config) => Some(config),
            LoadResult::Failure(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &CompositionError> {
        self.results.iter().filter_map(|result| match result {
            LoadResult::Success(_) => None,
            LoadResult::Failure(error) => Some(error),
        })
    }

    /// Split into successes and failures, each in candidate order.
    pub fn partition(self) -> (Vec<DomainConfig>, Vec<CompositionError>) {
        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in self.results {
            match result {
                LoadResult::Success(config) => successes.push(config),
                LoadResult::Failure(error) => failures.push(error),
            }
        }
        (successes, failures)
    }
}
