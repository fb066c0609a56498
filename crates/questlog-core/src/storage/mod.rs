mod config;
pub mod backup;
pub mod database;

pub use config::{HealthSettings, PomodoroSettings, Settings};
pub use database::Database;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// `QUESTLOG_DATA_DIR` overrides the default `~/.config/questlog` (used for
/// development and test isolation).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("QUESTLOG_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("questlog"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
