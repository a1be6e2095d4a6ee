use crate::domain::{AppError, IoConfig, Table};

/// Port for reading and writing datasets described by an `IoConfig`.
pub trait DatasetIo: Send + Sync {
    fn read(&self, config: &IoConfig) -> Result<Table, AppError>;

    fn write(&self, table: &Table, config: &IoConfig) -> Result<(), AppError>;
}
