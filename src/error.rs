use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{executable} not found in PATH")]
    NotFound { executable: String },

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("{0}")]
    Other(String),
}

impl AuditError {
    /// True for the "executable absent from the search path" kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AuditError::NotFound { .. })
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A single cleanable item that could not be cleaned.
///
/// Collected in `CleanResult::errors`; never aborts the remaining items.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to clean {description}: {message}")]
pub struct CleanFailure {
    pub description: String,
    pub message: String,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AuditError>;
