mod clock;
mod config_source;
mod dataset_io;
mod pipeline;

pub use clock::Clock;
pub use config_source::ConfigSource;
pub use dataset_io::DatasetIo;
pub use pipeline::{DomainPipeline, PipelineContext, PipelineError};
