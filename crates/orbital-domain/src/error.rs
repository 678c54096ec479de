//! Error handling types
//!
//! Expected store outcomes (not found, conflict, precondition failed) are
//! surfaced by repositories as `None`/`false` values. Everything that reaches
//! this enum is either transient (retried by a resilience pipeline) or fatal.

use crate::ports::providers::StoreStatus;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Orbital
#[derive(Error, Debug)]
pub enum Error {
    /// Store returned a status the caller has to deal with
    #[error("Store error ({status}): {message}")]
    Store {
        /// Status classification reported by the store
        status: StoreStatus,
        /// Description of the failure
        message: String,
    },

    /// Circuit breaker rejected the call without invoking the operation
    #[error("Circuit '{pipeline}' is open, retry after {retry_after:?}")]
    CircuitOpen {
        /// Name of the pipeline owning the breaker
        pipeline: String,
        /// Remaining break duration
        retry_after: Duration,
    },

    /// The operation observed its cancellation signal
    #[error("Operation cancelled")]
    Cancelled,

    /// JSON parsing or serialization error
    #[error("Serialization error: {source}")]
    Serialization {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure error carrying a foreign source
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a store error for the given status
    pub fn store<S: Into<String>>(status: StoreStatus, message: S) -> Self {
        Self::Store {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Store status carried by this error, if any
    pub fn status(&self) -> Option<StoreStatus> {
        match self {
            Self::Store { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Throttling and timeouts; the only failures a default pipeline retries
    pub fn is_transient(&self) -> bool {
        self.status().is_some_and(StoreStatus::is_transient)
    }

    /// Store reported the document as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(StoreStatus::NotFound))
    }

    /// Store reported a duplicate id
    pub fn is_conflict(&self) -> bool {
        matches!(self.status(), Some(StoreStatus::Conflict))
    }

    /// Store rejected a conditioned write
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self.status(), Some(StoreStatus::PreconditionFailed))
    }

    /// Breaker rejection
    pub fn is_circuit_open(&self) -> bool {
        matches!(self, Self::CircuitOpen { .. })
    }
}
