//! Error types for cleaning steps.

use thiserror::Error;

use csvise_model::TypeTag;

/// Errors raised by a single cleaning step. A failed step leaves the table untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CleanError {
    /// Numeric fill requested for a column that is not numeric.
    #[error("cannot fill column '{column}' with {strategy}: column type is {expected}")]
    UnsupportedFillStrategy {
        column: String,
        strategy: String,
        expected: TypeTag,
    },

    #[error("threshold {threshold} is outside [0.0, 1.0]")]
    InvalidThreshold { threshold: f64 },

    #[error("column not found: {name}")]
    ColumnNotFound { name: String },

    /// A step description could not be parsed.
    #[error("invalid cleaning step '{input}': {reason}")]
    InvalidStep { input: String, reason: String },
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, CleanError>;
