//! Name and tag filtering of composed domains.

use std::collections::BTreeSet;

use crate::domain::configuration::{DomainConfig, GlobalConfig};

/// Active name and tag filters for one invocation. Empty sets do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionFilter {
    pub domains: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

impl SelectionFilter {
    pub fn new<D, T>(domains: D, tags: T) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_global(global: &GlobalConfig) -> Self {
        Self { domains: global.active_domains.clone(), tags: global.active_tags.clone() }
    }

    /// Command-line values replace the configured filter when non-empty.
    pub fn with_overrides(mut self, domains: &[String], tags: &[String]) -> Self {
        if !domains.is_empty() {
            self.domains = domains.iter().cloned().collect();
        }
        if !tags.is_empty() {
            self.tags = tags.iter().cloned().collect();
        }
        self
    }

    fn matches_filters(&self, domain: &DomainConfig) -> bool {
        (self.domains.is_empty() || self.domains.contains(domain.name.as_str()))
            && (self.tags.is_empty() || domain.has_any_tag(&self.tags))
    }

    pub fn matches(&self, domain: &DomainConfig) -> bool {
        domain.enabled && self.matches_filters(domain)
    }
}

/// Execution set: enabled domains passing both filters, in input order.
pub fn select<'a>(domains: &'a [DomainConfig], filter: &SelectionFilter) -> Vec<&'a DomainConfig> {
    domains.iter().filter(|domain| filter.matches(domain)).collect()
}

/// Disabled domains that the name filter asked for explicitly.
pub fn skipped_disabled<'a>(
    domains: &'a [DomainConfig],
    filter: &SelectionFilter,
) -> Vec<&'a DomainConfig> {
    if filter.domains.is_empty() {
        return Vec::new();
    }
    domains.iter().filter(|domain| !domain.enabled && filter.matches_filters(domain)).collect()
}
