pub mod config;
pub mod database;
pub mod migrations;

pub use config::Config;
pub use database::{MoodLogEntry, TaskDb};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/moodtask[-dev]/` based on MOODTASK_ENV.
///
/// Set MOODTASK_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MOODTASK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("moodtask-dev")
    } else {
        base_dir.join("moodtask")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
