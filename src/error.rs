//! Error types for querypipe.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for querypipe operations.
#[derive(Error, Debug)]
pub enum QuerypipeError {
    /// Mock engine hit an unexpected internal fault.
    #[error("Execution error: {0}")]
    Execution(String),

    /// A named secret bundle could not be found.
    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    /// A serialized record is missing required fields or is not valid JSON.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem errors while reading or writing artifacts.
    #[error("I/O error: {0}")]
    Io(String),
}

impl QuerypipeError {
    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a secret-not-found error for the given bundle name.
    pub fn secret_not_found(name: impl Into<String>) -> Self {
        Self::SecretNotFound(name.into())
    }

    /// Creates a malformed-record error with the given message.
    pub fn malformed_record(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Execution(_) => "Execution Error",
            Self::SecretNotFound(_) => "Secret Not Found",
            Self::MalformedRecord(_) => "Malformed Record",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
        }
    }
}

impl From<std::io::Error> for QuerypipeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Result type alias using QuerypipeError.
pub type Result<T> = std::result::Result<T, QuerypipeError>;
