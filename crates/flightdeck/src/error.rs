//! Error types for flightdeck.
//!
//! This module defines all error types used throughout the flightdeck crate.
//! The only error the flight store itself produces is [`Error::NotFound`];
//! everything else comes from the layers around it.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::flight::FlightId;

/// The main error type for flightdeck operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// No flight record matches the requested identifier.
    #[error("Flight not found")]
    NotFound {
        /// The identifier that was looked up.
        id: FlightId,
    },

    // === Request Errors ===
    /// The request body could not be decoded into a flight record.
    #[error("invalid request body: {message}")]
    InvalidBody {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// Failed to bind the HTTP listener.
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        /// Address the server tried to bind.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be found.
    #[error("configuration file not found: {}", path.display())]
    ConfigFileMissing {
        /// Path that was requested.
        path: PathBuf,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for flightdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given identifier.
    #[must_use]
    pub fn not_found(id: FlightId) -> Self {
        Self::NotFound { id }
    }

    /// Create an invalid request body error.
    #[must_use]
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means no flight matched.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was caused by the client's request.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidBody { .. })
    }
}
