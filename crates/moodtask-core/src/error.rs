//! Core error types for moodtask-core.
//!
//! Classification and reorganization are total operations and never return
//! these errors to the caller. They surface from the configuration, storage
//! and parsing boundaries, and from the remote strategy internally.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for moodtask-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Reasons the remote classification strategy gave up.
///
/// Every variant is recovered by falling back to the keyword strategy.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// No API key in the configured environment variable
    #[error("API key not configured (set {env_var})")]
    MissingApiKey { env_var: String },

    /// The request did not complete within the configured timeout
    #[error("Classification request timed out: {0}")]
    Timeout(String),

    /// Connection or other transport failure
    #[error("Classification request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Classification service returned status {status}")]
    Status { status: u16 },

    /// Response envelope or payload could not be parsed
    #[error("Malformed classification response: {0}")]
    Malformed(String),

    /// The service returned no choices
    #[error("Classification service returned no choices")]
    EmptyResponse,

    /// The mood label is not one of the five known moods
    #[error("Invalid mood returned: {0}")]
    InvalidMood(String),

    /// Confidence is not a finite number in [0, 1]
    #[error("Invalid confidence returned: {0}")]
    InvalidConfidence(f64),
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClassifyError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClassifyError::Malformed(err.to_string())
        } else {
            ClassifyError::Transport(err.to_string())
        }
    }
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No usable home/config directory
    #[error("Could not determine data directory: {0}")]
    DataDir(String),
}

/// Validation errors at the parsing and storage boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Mood label outside the closed set
    #[error("Unknown mood '{0}' (expected Happy, Tired, Stressed, Focused or Energetic)")]
    UnknownMood(String),

    /// Priority label outside Low/Medium/High
    #[error("Unknown priority '{0}' (expected Low, Medium or High)")]
    UnknownPriority(String),

    /// Status label outside Todo/In Progress/Completed
    #[error("Unknown status '{0}' (expected Todo, In Progress or Completed)")]
    UnknownStatus(String),

    /// Numeric field outside its allowed range
    #[error("Invalid value for '{field}': {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
