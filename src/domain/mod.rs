pub mod configuration;
pub mod error;
pub mod identifiers;
pub mod io_config;
pub mod run_report;
pub mod schedule;
pub mod selection;
pub mod table;

pub use configuration::{
    BatchPreset, Composition, CompositionError, DomainConfig, GlobalConfig, LoadResult,
    LoggingConfig, OverlapPolicy, SchedulerSettings,
};
pub use error::AppError;
pub use identifiers::DomainName;
pub use io_config::{FileFormat, IoConfig};
pub use run_report::{DomainOutcome, FailureKind, Outcome, RunReport};
pub use schedule::{DayOfWeek, Interval, ScheduleConfig, ScheduleError, TriggerSpec};
pub use selection::SelectionFilter;
pub use table::Table;
