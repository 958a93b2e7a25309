//! Error types for the cafeteria billing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving a billing month.

use thiserror::Error;

/// The main error type for the billing engine.
///
/// All fallible operations return this error type. Errors raised while
/// billing a single person are collected per person by the report builder
/// instead of aborting the whole run.
///
/// # Example
///
/// ```
/// use comedor_billing::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/discounts.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/discounts.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

    /// No active discount configuration exists for the billing run.
    #[error("no active price configuration found: {message}")]
    MissingConfiguration {
        /// What was looked for.
        message: String,
    },

    /// A configuration value is outside its allowed range or is inconsistent.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfiguration {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A date could not be read as either `YYYY-MM-DD` or `DD/MM/YYYY`.
    #[error("Unrecognised date '{value}' in record '{record_id}' (expected YYYY-MM-DD or DD/MM/YYYY)")]
    AmbiguousDateEncoding {
        /// The record holding the date.
        record_id: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// An enrollment record carries values the engine cannot bill.
    #[error("Invalid enrollment '{enrollment_id}': {message}")]
    InvalidEnrollment {
        /// The ID of the invalid enrollment.
        enrollment_id: String,
        /// A description of what made the enrollment invalid.
        message: String,
    },

    /// The requested billing month does not exist.
    #[error("Invalid billing period {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month (1-12 expected).
        month: u32,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns a stable machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            EngineError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            EngineError::MissingConfiguration { .. } => "MISSING_CONFIGURATION",
            EngineError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            EngineError::AmbiguousDateEncoding { .. } => "AMBIGUOUS_DATE_ENCODING",
            EngineError::InvalidEnrollment { .. } => "INVALID_ENROLLMENT",
            EngineError::InvalidPeriod { .. } => "INVALID_PERIOD",
            EngineError::CalculationError { .. } => "CALCULATION_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
