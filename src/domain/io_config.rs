//! Dataset location and format descriptors.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

/// Format identifiers a domain may declare for an input or output.
///
/// Declaring a format does not make it usable: a codec must also be registered
/// for it in the IO registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Parquet,
    Json,
    Excel,
    Feather,
    Orc,
    Pickle,
    Sql,
    Delta,
}

impl FileFormat {
    pub const ALL: [FileFormat; 9] = [
        FileFormat::Csv,
        FileFormat::Parquet,
        FileFormat::Json,
        FileFormat::Excel,
        FileFormat::Feather,
        FileFormat::Orc,
        FileFormat::Pickle,
        FileFormat::Sql,
        FileFormat::Delta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Parquet => "parquet",
            FileFormat::Json => "json",
            FileFormat::Excel => "excel",
            FileFormat::Feather => "feather",
            FileFormat::Orc => "orc",
            FileFormat::Pickle => "pickle",
            FileFormat::Sql => "sql",
            FileFormat::Delta => "delta",
        }
    }

    pub fn from_name(name: &str) -> Option<FileFormat> {
        let name = name.to_lowercase();
        FileFormat::ALL.into_iter().find(|format| format.as_str() == name)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IO configuration for a single dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    /// Filesystem path or URI.
    pub path: String,
    pub format: FileFormat,
    /// Format-specific options passed through to the codec.
    #[serde(default)]
    pub options: BTreeMap<String, serde_json::Value>,
    /// Remote storage credentials and parameters.
    #[serde(default)]
    pub storage_options: BTreeMap<String, serde_json::Value>,
}

impl IoConfig {
    pub fn new(path: impl Into<String>, format: FileFormat) -> Self {
        Self {
            path: path.into(),
            format,
            options: BTreeMap::new(),
            storage_options: BTreeMap::new(),
        }
    }

    /// True when `path` carries a URL scheme (`s3://`, `https://`, ...).
    ///
    /// Single-letter schemes are Windows drive letters, not URIs.
    pub fn is_uri(&self) -> bool {
        is_uri(&self.path)
    }

    /// True for URIs that do not point at the local filesystem.
    pub fn is_remote(&self) -> bool {
        match Url::parse(&self.path) {
            Ok(url) => url.scheme().len() > 1 && url.scheme() != "file",
            Err(_) => false,
        }
    }

    /// Local filesystem path, resolving `file://` URIs.
    pub fn local_path(&self) -> Option<std::path::PathBuf> {
        match Url::parse(&self.path) {
            Ok(url) if url.scheme() == "file" => url.to_file_path().ok(),
            Ok(url) if url.scheme().len() > 1 => None,
            _ => Some(Path::new(&self.path).to_path_buf()),
        }
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|value| value.as_str())
    }

    pub fn option_bool(&self, key: &str) -> Option<bool> {
        self.options.get(key).and_then(|value| value.as_bool())
    }
}

pub(crate) fn is_uri(path: &str) -> bool {
    Url::parse(path).map(|url| url.scheme().len() > 1).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!(FileFormat::from_name("CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_name("parquet"), Some(FileFormat::Parquet));
        assert_eq!(FileFormat::from_name("xlsx"), None);
    }

    #[test]
    fn uri_detection() {
        assert!(IoConfig::new("s3://bucket/key.csv", FileFormat::Csv).is_uri());
        assert!(IoConfig::new("s3://bucket/key.csv", FileFormat::Csv).is_remote());
        assert!(!IoConfig::new("data/raw.csv", FileFormat::Csv).is_uri());
        assert!(!IoConfig::new("/abs/raw.csv", FileFormat::Csv).is_uri());
        assert!(!IoConfig::new("C:\\data\\raw.csv", FileFormat::Csv).is_uri());
    }

    #[test]
    fn file_uri_is_local() {
        let cfg = IoConfig::new("file:///tmp/raw.csv", FileFormat::Csv);
        assert!(!cfg.is_remote());
        assert_eq!(cfg.local_path(), Some(std::path::PathBuf::from("/tmp/raw.csv")));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_value::<IoConfig>(serde_json::json!({
            "path": "a.csv",
            "format": "csv",
            "compression": "gzip"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("compression"));
    }
}
