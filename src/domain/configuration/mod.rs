pub mod domain_config;
pub mod global_config;
pub mod load_result;

pub use domain_config::DomainConfig;
pub use global_config::{BatchPreset, GlobalConfig, LoggingConfig, OverlapPolicy, SchedulerSettings};
pub use load_result::{Composition, CompositionError, LoadResult};
