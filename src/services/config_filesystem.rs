//! Filesystem-backed configuration source.
//!
//! Layout under the config directory:
//! - `config.toml` (or `config.yaml` / `config.yml`): the global document
//! - `domains/<name>.toml|yaml|yml`: one document per domain

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::AppError;
use crate::ports::ConfigSource;

pub const GLOBAL_STEM: &str = "config";
pub const DOMAINS_DIR: &str = "domains";
const EXTENSIONS: [&str; 3] = ["toml", "yaml", "yml"];

#[derive(Debug, Clone)]
pub struct FilesystemConfigSource {
    root: PathBuf,
}

impl FilesystemConfigSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    pub fn domains_dir(&self) -> PathBuf {
        self.root.join(DOMAINS_DIR)
    }

    fn global_path(&self) -> Option<PathBuf> {
        find_document(&self.root, GLOBAL_STEM)
    }

    fn domain_path(&self, name: &str) -> Option<PathBuf> {
        find_document(&self.domains_dir(), name)
    }
}

fn find_document(dir: &Path, stem: &str) -> Option<PathBuf> {
    EXTENSIONS.iter().map(|ext| dir.join(format!("{}.{}", stem, ext))).find(|path| path.is_file())
}

/// Parse a TOML or YAML document (chosen by extension) into a JSON tree.
fn parse_document(path: &Path) -> Result<Value, String> {
    let content = fs::read_to_string(path).map_err(|err| err.to_string())?;
    let value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str::<Value>(&content).map_err(|err| err.to_string())?,
        _ => serde_yaml::from_str::<Value>(&content).map_err(|err| err.to_string())?,
    };
    // An empty YAML file parses as null.
    Ok(if value.is_null() { Value::Object(Default::default()) } else { value })
}

impl ConfigSource for FilesystemConfigSource {
    fn origin(&self) -> String {
        self.root.display().to_string()
    }

    fn has_global_document(&self) -> bool {
        self.global_path().is_some()
    }

    fn global_document(&self) -> Result<Value, AppError> {
        if !self.exists() {
            return Err(AppError::ConfigDirNotFound(self.origin()));
        }
        let path = self.global_path().ok_or_else(|| AppError::GlobalConfig {
            origin: self.origin(),
            details: format!("no {}.toml, {}.yaml or {}.yml found", GLOBAL_STEM, GLOBAL_STEM, GLOBAL_STEM),
        })?;
        parse_document(&path).map_err(|details| AppError::GlobalConfig {
            origin: path.display().to_string(),
            details,
        })
    }

    fn domain_names(&self) -> Result<Vec<String>, AppError> {
        let dir = self.domains_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let known_ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| EXTENSIONS.contains(&ext));
            if let (true, Some(stem)) = (known_ext, path.file_stem().and_then(|s| s.to_str())) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        names.dedup();
        Ok(names)
    }

    fn domain_document(&self, name: &str) -> Result<Option<Value>, AppError> {
        let Some(path) = self.domain_path(name) else {
            return Ok(None);
        };
        parse_document(&path)
            .map(Some)
            .map_err(|details| AppError::ParseError { what: path.display().to_string(), details })
    }

    fn write_global_document(&self, content: &str) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(format!("{}.toml", GLOBAL_STEM));
        fs::write(&path, content)?;
        Ok(path)
    }

    fn write_domain_document(&self, name: &str, content: &str) -> Result<PathBuf, AppError> {
        if self.domain_path(name).is_some() {
            return Err(AppError::DomainExists(name.to_string()));
        }
        let dir = self.domains_dir();
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.toml", name));
        fs::write(&path, content)?;
        Ok(path)
    }
}
