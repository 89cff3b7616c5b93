//! Error types for sayback

use std::io;
use thiserror::Error;

/// Main error type for sayback
#[derive(Error, Debug)]
pub enum SaybackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for sayback operations
pub type Result<T> = std::result::Result<T, SaybackError>;

impl From<String> for SaybackError {
    fn from(s: String) -> Self {
        SaybackError::Other(s)
    }
}

impl From<&str> for SaybackError {
    fn from(s: &str) -> Self {
        SaybackError::Other(s.to_string())
    }
}
