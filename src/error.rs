//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine surfaces to its callers. The computation
//! core never retries and never masks a failure.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidPeriodInput {
///     input: "2026-13-01".to_string(),
///     message: "input is out of range".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid period input '2026-13-01': input is out of range"
/// );
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

    /// A configuration value was parsed but is out of range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending setting.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A reference date or period start could not be resolved to a payroll period.
    #[error("Invalid period input '{input}': {message}")]
    InvalidPeriodInput {
        /// The raw input that was rejected.
        input: String,
        /// A description of what was wrong with it.
        message: String,
    },

    /// A day-type label outside the known set.
    #[error("Unclassified day type: {label}")]
    UnclassifiedDayType {
        /// The label that did not match any day type.
        label: String,
    },

    /// A monthly salary that is negative (contribution precondition).
    #[error("Invalid monthly salary {value}: must be zero or greater")]
    InvalidSalary {
        /// The rejected salary.
        value: Decimal,
    },

    /// More than one open clock interval was found for a single employee.
    #[error("Employee '{employee_ref}' has more than one open clock interval")]
    ConcurrentOpenInterval {
        /// The employee the intervals belong to.
        employee_ref: String,
    },

    /// A clock interval whose timestamps are inconsistent.
    #[error("Invalid clock interval for employee '{employee_ref}': {message}")]
    InvalidClockInterval {
        /// The employee the interval belongs to.
        employee_ref: String,
        /// A description of what made the interval invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
