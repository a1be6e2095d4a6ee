use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::domain::AppError;
use crate::ports::ConfigSource;

/// In-memory config source for testing.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct MemoryConfigSource {
    pub global: Value,
    /// `Err` entries simulate documents that fail to parse.
    pub domains: BTreeMap<String, Result<Value, String>>,
    pub written: RefCell<Vec<(PathBuf, String)>>,
}

#[allow(dead_code)]
impl MemoryConfigSource {
    pub fn new(global: Value) -> Self {
        Self { global, ..Default::default() }
    }

    pub fn with_domain(mut self, name: &str, document: Value) -> Self {
        self.domains.insert(name.to_string(), Ok(document));
        self
    }

    pub fn with_broken_domain(mut self, name: &str, details: &str) -> Self {
        self.domains.insert(name.to_string(), Err(details.to_string()));
        self
    }
}

impl ConfigSource for MemoryConfigSource {
    fn origin(&self) -> String {
        "memory".to_string()
    }

    fn has_global_document(&self) -> bool {
        !self.global.is_null()
    }

    fn global_document(&self) -> Result<Value, AppError> {
        if self.global.is_null() {
            return Err(AppError::GlobalConfig {
                origin: self.origin(),
                details: "no global document".into(),
            });
        }
        Ok(self.global.clone())
    }

    fn domain_names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.domains.keys().cloned().collect())
    }

    fn domain_document(&self, name: &str) -> Result<Option<Value>, AppError> {
        match self.domains.get(name) {
            None => Ok(None),
            Some(Ok(document)) => Ok(Some(document.clone())),
            Some(Err(details)) => Err(AppError::ParseError {
                what: format!("memory://domains/{}", name),
                details: details.clone(),
            }),
        }
    }

    fn write_global_document(&self, content: &str) -> Result<PathBuf, AppError> {
        let path = PathBuf::from("config.toml");
        self.written.borrow_mut().push((path.clone(), content.to_string()));
        Ok(path)
    }

    fn write_domain_document(&self, name: &str, content: &str) -> Result<PathBuf, AppError> {
        if self.domains.contains_key(name) {
            return Err(AppError::DomainExists(name.to_string()));
        }
        let path = PathBuf::from(format!("domains/{}.toml", name));
        self.written.borrow_mut().push((path.clone(), content.to_string()));
        Ok(path)
    }
}
