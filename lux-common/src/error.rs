//! Common error types for Lux

use std::time::Duration;
use thiserror::Error;

/// Common result type for Lux operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Lux server and client
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Undecodable or oversized request payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Undecodable response payload or encoding failure
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Connection exceeded its processing bound
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl Error {
    /// True when the fault was caused by the peer's payload rather than the server
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_mentions_invalid_input() {
        let err = Error::InvalidInput("invalid JSON: expected value".to_string());
        assert_eq!(err.to_string(), "Invalid input: invalid JSON: expected value");
        assert!(err.is_client_fault());
    }

    #[test]
    fn test_io_error_is_not_client_fault() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone").into();
        assert!(err.to_string().starts_with("IO error"));
        assert!(!err.is_client_fault());
    }
}
