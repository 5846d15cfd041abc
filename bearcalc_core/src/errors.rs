//! # Error Types
//!
//! Structured error types for bearcalc_core. Strict evaluation
//! ([`crate::calculations::Calculation::calculate`]) reports exactly which
//! input was rejected and why; lenient evaluation swallows these and
//! returns a zeroed result instead.
//!
//! ## Example
//!
//! ```rust
//! use bearcalc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_term(years: f64) -> CalcResult<()> {
//!     if !(years > 0.0) {
//!         return Err(CalcError::invalid_input(
//!             "loan_term_years",
//!             years.to_string(),
//!             "Loan term must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_term(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bearcalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is not a finite number or violates a domain guard
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No calculator is registered under this slug
    #[error("Unknown calculator: {slug}")]
    UnknownCalculator { slug: String },

    /// Unit name is not part of the requested conversion table
    #[error("Unknown unit '{unit}' in category {category}")]
    UnknownUnit { category: String, unit: String },

    /// Inputs passed their guards but the result is not representable
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownCalculator error
    pub fn unknown_calculator(slug: impl Into<String>) -> Self {
        CalcError::UnknownCalculator { slug: slug.into() }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(category: impl Into<String>, unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            category: category.into(),
            unit: unit.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownCalculator { .. } => "UNKNOWN_CALCULATOR",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

// ============================================================================
// Guards shared by every calculator's validate()
// ============================================================================

/// Require a finite number.
pub fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Must be a number"))
    }
}

/// Require a finite number strictly greater than zero.
pub fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Must be greater than zero"))
    }
}

/// Require a finite number that is zero or greater.
pub fn require_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Cannot be negative"))
    }
}

/// Require a finite, non-zero number (used for divisors that may be negative).
pub fn require_non_zero(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value != 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Cannot be zero"))
    }
}
