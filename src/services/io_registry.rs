//! Format-keyed table of dataset readers and writers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{AppError, FileFormat, IoConfig, Table};
use crate::ports::DatasetIo;

use super::codecs;

pub type Reader = Arc<dyn Fn(&IoConfig) -> Result<Table, AppError> + Send + Sync>;
pub type Writer = Arc<dyn Fn(&Table, &IoConfig) -> Result<(), AppError> + Send + Sync>;

/// Reader/writer pair registered for one format.
#[derive(Clone)]
pub struct Codec {
    pub reader: Reader,
    pub writer: Writer,
}

/// Lookup table from format to codec. Holds no other state.
#[derive(Clone, Default)]
pub struct IoRegistry {
    codecs: HashMap<FileFormat, Codec>,
}

impl IoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the CSV and JSON codecs that ship with the crate.
    pub fn with_builtin_codecs() -> Self {
        let mut registry = Self::new();
        registry.register(FileFormat::Csv, codecs::csv::read, codecs::csv::write);
        registry.register(FileFormat::Json, codecs::json::read, codecs::json::write);
        registry
    }

    /// Associate `format` with a codec, replacing any previous one.
    pub fn register<R, W>(&mut self, format: FileFormat, reader: R, writer: W)
    where
        R: Fn(&IoConfig) -> Result<Table, AppError> + Send + Sync + 'static,
        W: Fn(&Table, &IoConfig) -> Result<(), AppError> + Send + Sync + 'static,
    {
        self.codecs.insert(format, Codec { reader: Arc::new(reader), writer: Arc::new(writer) });
    }

    pub fn resolve(&self, format: FileFormat) -> Result<Codec, AppError> {
        self.codecs
            .get(&format)
            .cloned()
            .ok_or_else(|| AppError::UnsupportedFormat { format: format.to_string() })
    }

    pub fn contains(&self, format: FileFormat) -> bool {
        self.codecs.contains_key(&format)
    }

    /// Registered formats in declaration order.
    pub fn formats(&self) -> Vec<FileFormat> {
        let mut formats: Vec<FileFormat> = self.codecs.keys().copied().collect();
        formats.sort();
        formats
    }
}

impl std::fmt::Debug for IoRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IoRegistry").field("formats", &self.formats()).finish()
    }
}

impl DatasetIo for IoRegistry {
    fn read(&self, config: &IoConfig) -> Result<Table, AppError> {
        let codec = self.resolve(config.format)?;
        (codec.reader)(config).map_err(|err| match err {
            AppError::IoRead { .. } | AppError::IoWrite { .. } => err,
            other => AppError::IoRead {
                path: config.path.clone(),
                format: config.format.to_string(),
                details: other.to_string(),
            },
        })
    }

    fn write(&self, table: &Table, config: &IoConfig) -> Result<(), AppError> {
        let codec = self.resolve(config.format)?;
        (codec.writer)(table, config).map_err(|err| match err {
            AppError::IoRead { .. } | AppError::IoWrite { .. } => err,
            other => AppError::IoWrite {
                path: config.path.clone(),
                format: config.format.to_string(),
                details: other.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[test]
    fn unregistered_format_is_unsupported() {
        let registry = IoRegistry::with_builtin_codecs();
        assert!(registry.contains(FileFormat::Csv));
        let err = registry.resolve(FileFormat::Parquet).err().unwrap();
        assert!(matches!(err, AppError::UnsupportedFormat { ref format } if format == "parquet"));
    }

    #[test]
    fn re_registration_replaces_previous_codec() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = IoRegistry::with_builtin_codecs();

        let counter = Arc::clone(&calls);
        registry.register(
            FileFormat::Csv,
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Table::new(vec!["stub".into()]))
            },
            |_, _| Ok(()),
        );

        let table = registry.read(&IoConfig::new("missing.csv", FileFormat::Csv)).unwrap();
        assert_eq!(table.columns, vec!["stub"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.formats(), vec![FileFormat::Csv, FileFormat::Json]);
    }

    #[test]
    fn codec_failures_carry_path_and_format() {
        let mut registry = IoRegistry::new();
        registry.register(
            FileFormat::Parquet,
            |_| Err(AppError::config_error("corrupt footer")),
            |_, _| Err(AppError::config_error("disk full")),
        );
        let config = IoConfig::new("data/x.parquet", FileFormat::Parquet);

        let err = registry.read(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to read dataset | path=data/x.parquet | format=parquet: corrupt footer"
        );
        let err = registry.write(&Table::default(), &config).unwrap_err();
        assert!(matches!(err, AppError::IoWrite { .. }));
    }

    #[test]
    fn builtin_csv_reads_what_it_wrote() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out.csv");
        let config = IoConfig::new(path.to_string_lossy(), FileFormat::Csv);
        let registry = IoRegistry::with_builtin_codecs();

        let mut table = Table::new(vec!["id".into(), "name".into()]);
        table.push_row(vec![json!("1"), json!("alice")]);
        registry.write(&table, &config).unwrap();

        assert_eq!(registry.read(&config).unwrap(), table);
    }
}
