//! Log subscriber setup.
//!
//! The terminal UI owns stderr, so log lines go to `<data_dir>/appraise.log`.
//! `RUST_LOG` wins over the configured filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber writing to `log_path`.
///
/// # Errors
///
/// Returns `Err` if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(log_path: &Path, default_filter: &str) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(std::io::Error::other)
}
