//! Error types for the orgweave system.

use thiserror::Error;

/// Main error type for orgweave operations.
#[derive(Error, Debug)]
pub enum OrgweaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for orgweave operations.
pub type Result<T> = std::result::Result<T, OrgweaveError>;
