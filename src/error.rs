//! Error types for the wage statement engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the calendar resolver, the calculation engine and the
//! statement exporter can report.

use thiserror::Error;

/// The main error type for the wage statement engine.
///
/// Engine errors are raised before a [`SalaryCalculation`] exists, so a caller
/// never sees a partial result. Export errors are raised per export action and
/// leave the calculation they were rendering untouched.
///
/// [`SalaryCalculation`]: crate::models::SalaryCalculation
///
/// # Example
///
/// ```
/// use wage_statement::error::EngineError;
///
/// let error = EngineError::UnsupportedYear { year: 2031 };
/// assert_eq!(error.to_string(), "No holiday calendar configured for year 2031");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A calculation input was out of range or inconsistent.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The holiday calendar has no table for the requested year.
    #[error("No holiday calendar configured for year {year}")]
    UnsupportedYear {
        /// The year that is not covered.
        year: i32,
    },

    /// Producing a statement artifact failed.
    #[error("Export to {format} failed: {message}")]
    ExportFailure {
        /// The export format that was requested (e.g. "pdf").
        format: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
