pub mod codecs;
mod config_filesystem;
mod io_registry;
mod pipeline_registry;
pub mod scaffold_assets;
mod system_clock;

pub use config_filesystem::{DOMAINS_DIR, FilesystemConfigSource, GLOBAL_STEM};
pub use io_registry::{Codec, IoRegistry, Reader, Writer};
pub use pipeline_registry::{COPY_PIPELINE, PipelineRegistry};
pub use system_clock::SystemClock;
