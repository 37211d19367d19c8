//! Error type shared by the client and config helpers.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UtilsError>;

#[derive(Debug, Error)]
pub enum UtilsError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The HTTP client could not be built from its configuration.
    #[error("Client error: {0}")]
    Client(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file exists but does not parse.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// An environment variable is set but unusable.
    #[error("Invalid value for {key}: {message}")]
    InvalidEnv { key: String, message: String },
}

impl UtilsError {
    pub(crate) fn parse(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        UtilsError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
