//! Core error types for habitual-core.
//!
//! Ordinary rejections (duplicate names, repeated check-offs, unknown habits)
//! are not errors; they travel as [`crate::Outcome`] values. The types here
//! cover the failures that actually abort an operation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitual-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Login errors
    #[error("Login failed: {0}")]
    Login(#[from] LoginError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading or writing persisted habit data.
///
/// `Missing` and `Corrupt` are recoverable on the read path: the session
/// substitutes an empty collection and keeps going.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Nothing has been stored under this key yet
    #[error("No saved data at {path}")]
    Missing { path: PathBuf },

    /// The stored data could not be parsed
    #[error("Malformed data at {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Writing the data failed
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Whether the session may carry on with an empty collection.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StorageError::Missing { .. } | StorageError::Corrupt { .. })
    }
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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Periodicity other than daily or weekly
    #[error("Invalid periodicity '{0}'. Please use 'daily' or 'weekly'.")]
    InvalidPeriodicity(String),
}

/// Reasons a login attempt is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("User '{0}' does not exist. Please register first.")]
    UnknownUser(String),

    #[error("Incorrect password.")]
    IncorrectPassword,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
