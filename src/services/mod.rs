pub mod fs;
pub mod time_source;
pub mod tracing_setup;
