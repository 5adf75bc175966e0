//! Error types for dm-core

use thiserror::Error;

/// Core error type for duckmigrate
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Malformed database address
    #[error("[C003] Invalid database address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// C004: Migrations table name is not a plain SQL identifier
    #[error("[C004] Invalid migrations table name '{name}': {reason}")]
    InvalidTableName { name: String, reason: String },

    /// C005: IO error with file path context
    #[error("[C005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C006: YAML parse error
    #[error("[C006] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
