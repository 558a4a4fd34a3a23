//! File logging setup.
//!
//! The terminal is in the alternate screen while the game runs, so events go
//! to ~/.flappy/flappy.log. Verbosity comes from `FLAPPY_LOG` (EnvFilter
//! syntax), defaulting to `info`.

use crate::constants::LOG_FILE;
use crate::utils::persistence::save_path;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "FLAPPY_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns the log file path.
pub fn init_logging() -> io::Result<PathBuf> {
    let path = save_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(path)
}
