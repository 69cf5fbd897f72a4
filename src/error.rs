//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition that can occur while loading tax rules,
//! reading form input, computing reward rates, or storing favorites.
//!
//! The tax and benefit calculators themselves are infallible; only the
//! code around them returns [`EngineResult`].

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the salary engine.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rules");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
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

    /// No tax rules are effective for the requested date or financial year.
    #[error("No tax rules effective for {period}")]
    RulesNotFound {
        /// The date or financial-year label that was requested.
        period: String,
    },

    /// A slab table violated one of its ordering invariants.
    #[error("Invalid slab table: {message}")]
    InvalidSlabTable {
        /// A description of the violated invariant.
        message: String,
    },

    /// A required form field was empty.
    #[error("Missing field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// A form field held a value that is not a usable amount.
    #[error("Invalid value for '{field}': {message}")]
    InvalidInput {
        /// The name of the invalid field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A ratio could not be computed, e.g. a reward rate on zero spend.
    #[error("Undefined {metric}: {reason}")]
    UndefinedRate {
        /// The metric that could not be computed.
        metric: String,
        /// Why the metric is undefined.
        reason: String,
    },

    /// A favorite with the given id does not exist.
    #[error("Favorite not found: {id}")]
    FavoriteNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The favorites store could not be read or written.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::RulesNotFound`] for a calendar date.
    pub fn rules_not_found_on(date: NaiveDate) -> Self {
        EngineError::RulesNotFound {
            period: format!("date {}", date),
        }
    }

    /// Builds a [`EngineError::RulesNotFound`] for a financial-year label.
    pub fn rules_not_found_for_year(financial_year: &str) -> Self {
        EngineError::RulesNotFound {
            period: format!("financial year {}", financial_year),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
