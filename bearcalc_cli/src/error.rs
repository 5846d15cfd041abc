//! Error types for the bearcalc command line.
//!
//! Calculator errors from `bearcalc_core` are wrapped as-is so the binary
//! can print their structured form.

use bearcalc_core::CalcError;
use thiserror::Error;

/// The main error type for bearcalc CLI operations.
#[derive(Error, Debug)]
pub enum Error {
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

    // === Calculation Errors ===
    /// A calculator rejected its input or could not be found.
    #[error(transparent)]
    Calculation(#[from] CalcError),

    // === Argument Errors ===
    /// A command-line argument could not be used.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for bearcalc CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// The wrapped calculator error, if this is one.
    #[must_use]
    pub fn as_calculation(&self) -> Option<&CalcError> {
        match self {
            Self::Calculation(err) => Some(err),
            _ => None,
        }
    }
}
