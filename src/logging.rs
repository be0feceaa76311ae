//! Log setup for the binary: stderr plus a plain-text process log file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::core::ConvertError;

/// Path of the process log for a run stamped `stamp`.
pub fn log_file_path(log_dir: &Path, stamp: &str) -> PathBuf {
    log_dir.join(format!("process_{stamp}.log"))
}

/// Build the filter: `RUST_LOG` when set, otherwise `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber and return the log file path.
///
/// Must be called at most once per process.
pub fn init(
    log_dir: &Path,
    stamp: &str,
    default_directive: &str,
) -> Result<PathBuf, ConvertError> {
    fs::create_dir_all(log_dir)?;
    let path = log_file_path(log_dir, stamp);
    let file = File::create(&path)?;

    tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| ConvertError::Config(format!("cannot install log subscriber: {e}")))?;

    Ok(path)
}
