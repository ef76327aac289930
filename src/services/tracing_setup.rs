//! Tracing subscriber setup
//!
//! Shared tracing configuration for the binary. Logs go to stderr by
//! default so rendered output on stdout stays clean; a log file can be
//! given to redirect diagnostics instead.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Environment-based filtering (RUST_LOG) applies, with an INFO default.
/// If the log file cannot be created, falls back to stderr.
pub fn init_global(log_file_path: Option<&Path>) {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let log_file = log_file_path.and_then(|path| File::create(path).ok());

    match log_file {
        Some(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .with(env_filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(env_filter)
                .init();
        }
    }
}
