//! Error types for the preview pipeline.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building a pass, before any tree is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{pass}: '{option}' is a mandatory option")]
    MissingOption {
        pass: &'static str,
        option: &'static str,
    },

    #[error("{pass}: invalid '{option}': {reason}")]
    InvalidOption {
        pass: &'static str,
        option: &'static str,
        reason: String,
    },

    #[error("Invalid TOML: {0}")]
    Toml(String),
}

/// Errors that occur during serialization.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported node kind: {0}")]
    Unsupported(String),
}
