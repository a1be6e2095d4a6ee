//! dataflow: compose per-domain pipeline configuration and run domains in
//! batch or on recurring schedules.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    DomainSummary, InitOutcome, RunOptions, ScheduleOptions, ScheduleOutcome, ValidateOutcome,
    create_domain_at, init_at, list_at, resolve_config_dir, run_at, schedule_at, validate_at,
};
pub use app::{AppContext, Orchestrator, SchedulerRunner};
pub use domain::{AppError, DomainConfig, RunReport, Table};
pub use ports::{Clock, DatasetIo, DomainPipeline, PipelineContext, PipelineError};
pub use services::{FilesystemConfigSource, IoRegistry, PipelineRegistry, SystemClock};
