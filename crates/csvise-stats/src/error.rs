//! Error types for statistics.

use thiserror::Error;

use csvise_model::TypeTag;

/// Errors that can occur during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("column not found: {name}")]
    ColumnNotFound { name: String },

    /// A numeric operation was requested on a non-numeric column.
    #[error("column '{column}' is not numeric (type is {found})")]
    NotNumeric { column: String, found: TypeTag },
}

/// Result type for statistics operations.
pub type Result<T> = std::result::Result<T, StatsError>;
