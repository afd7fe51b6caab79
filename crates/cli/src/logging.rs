//! Logging initialisation.
//!
//! The engine yields structured events instead of writing logs; everything
//! the operator sees goes through `tracing`. The subscriber always writes to
//! stdout and optionally appends an ANSI-free copy to a log file, matching
//! the original tool's stdout-plus-file setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// `level` is a tracing filter directive (typically just a level name); the
/// `RUST_LOG` environment variable takes precedence when set. Returns a
/// rendered message on failure so the caller can print it before logging
/// exists.
pub(crate) fn init(level: &str, log_file: Option<&Path>) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| parse_filter(level))?;

    let stdout_layer = fmt::layer().with_target(false);
    let registry = tracing_subscriber::registry().with(filter).with(stdout_layer);

    let result = match log_file {
        Some(path) => {
            let file_layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(open_log_file(path)?));
            registry.with(file_layer).try_init()
        }
        None => registry.try_init(),
    };

    result.map_err(|error| format!("failed to install logger: {error}"))
}

fn parse_filter(level: &str) -> Result<EnvFilter, String> {
    EnvFilter::try_new(level).map_err(|error| format!("invalid log level '{level}': {error}"))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, String> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("cannot open log file '{}': {error}", path.display()))
}
