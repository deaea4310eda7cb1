//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! aggregating work logs, calculating payroll, and reading or writing the
//! document store.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use estate_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
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

    /// The tax bracket table is malformed or its base amounts are inconsistent.
    #[error("Invalid tax table: {message}")]
    InvalidTaxTable {
        /// A description of the inconsistency.
        message: String,
    },

    /// A payroll input field was negative or out of range.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A daily work-log entry contained invalid data.
    #[error("Invalid work log entry for day {day}: {message}")]
    InvalidWorkLog {
        /// The day number of the offending entry.
        day: u8,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// A time-of-day string could not be parsed as `HH:MM`.
    #[error("Invalid time '{value}': {message}")]
    InvalidTime {
        /// The raw value that failed to parse.
        value: String,
        /// A description of the parse failure.
        message: String,
    },

    /// No employee document exists for the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id.
        id: String,
    },

    /// No work log exists for the employee and period.
    #[error("Work log not found for employee '{employee_id}' in period {period}")]
    WorkLogNotFound {
        /// The employee id.
        employee_id: String,
        /// The payroll period (`YYYY-MM`).
        period: String,
    },

    /// No payroll record exists for the given id.
    #[error("Payroll record not found: {id}")]
    RecordNotFound {
        /// The record id.
        id: String,
    },

    /// The document store failed to read or write a document.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// The error for a calculation whose result does not fit in a `Decimal`.
    pub fn amount_too_large(field: &str) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: "amount too large".to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
