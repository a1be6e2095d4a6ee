mod memory_config_source;

pub use memory_config_source::MemoryConfigSource;
