//! Logging setup for the fieldfmt CLI.
//!
//! Human-readable events go to stderr. With `--log-file`, structured JSON is
//! also appended to that file, compatible with the `hl` log viewer
//! (https://github.com/pamburus/hl).

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::PathsConfig;

/// Returns the default path of the JSONL log file.
pub fn log_file_path() -> PathBuf {
    PathsConfig::default().logs_dir().join("fieldfmt.jsonl")
}

/// Default filter directive for a `-v` count, used when `RUST_LOG` is unset
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Initialize logging for a CLI invocation.
/// Returns a guard that must be held until the command finishes when a log
/// file is in use.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(log_file) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter(verbosity))
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    if let Some(dir) = log_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).context("Failed to create log directory")?;
    }

    // Open file for appending (create if doesn't exist)
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(
            fmt::layer()
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_writer(non_blocking),
        )
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    Ok(Some(guard))
}
