//! Error types for remix operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all remix crates. Uses `thiserror` for derive macros.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Boxed error source carried by [`Error::Llm`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur in remix operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file.
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// File that could not be read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Recoverable input problem reported back to the user verbatim.
    #[error("{0}")]
    Validation(String),

    /// Language-model call failed.
    #[error("LLM error: {message}")]
    Llm {
        /// Human-readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an LLM error without an underlying cause.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm {
            message: msg.into(),
            source: None,
        }
    }

    /// Create an LLM error wrapping an underlying cause.
    pub fn llm_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Llm {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error that remembers which path failed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether the message is meant to be shown to the user as-is.
    ///
    /// Validation and configuration failures are recoverable: the caller
    /// resets its state and asks for different input.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }
}

/// Result type alias using the remix Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_message_verbatim() {
        let err = Error::validation("Please enter some text to remix");
        assert_eq!(err.to_string(), "Please enter some text to remix");
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_llm_with_source_keeps_cause() {
        let io = std::io::Error::other("connection reset");
        let err = Error::llm_with_source("Failed to call Claude API", io);
        assert_eq!(err.to_string(), "LLM error: Failed to call Claude API");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection reset");
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_io_with_path_mentions_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(io, "/tmp/notes.md");
        assert!(err.to_string().contains("/tmp/notes.md"));
    }

    #[test]
    fn test_config_is_user_facing() {
        assert!(Error::config("API key not configured").is_user_facing());
        assert!(!Error::invalid_data("bad").is_user_facing());
    }
}
