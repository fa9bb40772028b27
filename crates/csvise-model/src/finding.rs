use std::fmt;

use serde::Serialize;

use crate::types::TypeTag;

/// A single validation issue tied to a row (and column, for type mismatches).
///
/// Findings are reported to the user; they never abort parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFinding {
    LengthMismatch {
        row: usize,
        actual_len: usize,
        expected_len: usize,
    },
    TypeMismatch {
        row: usize,
        /// 1-based column position.
        column: usize,
        found: TypeTag,
        expected: TypeTag,
    },
}

impl ValidationFinding {
    pub fn row(&self) -> usize {
        match self {
            Self::LengthMismatch { row, .. } | Self::TypeMismatch { row, .. } => *row,
        }
    }

    pub fn is_length_mismatch(&self) -> bool {
        matches!(self, Self::LengthMismatch { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                row,
                actual_len,
                expected_len,
            } => write!(f, "Row {row} is of length {actual_len}, expected {expected_len}"),
            Self::TypeMismatch {
                row,
                column,
                found,
                expected,
            } => write!(f, "Row {row}, Column {column}: Found {found}, expected {expected}"),
        }
    }
}
