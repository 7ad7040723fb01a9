//! Error types for permstore internals
//!
//! These errors are raised inside the engine (file I/O, serialization,
//! configuration). Store primitives never surface them to facade callers;
//! they are logged and reported as a failed primitive instead.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

use crate::contract::NameError;

/// Result type alias for permstore internals
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the permstore engine
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A stored name failed validation
    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let err = Error::IoError(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::SerializationError(_)));
    }

    #[test]
    fn test_error_display_invalid_config() {
        let err = Error::InvalidConfig("worker_threads must be at least 1".to_string());
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_error_from_name_error() {
        let err: Error = NameError::Empty.into();
        assert_eq!(err.to_string(), "Invalid name: name cannot be empty");
    }
}
