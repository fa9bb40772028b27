//! Value type tags and the single-field classifier.
//!
//! Classification precedence is `bool`, then `int`, then `float`, then `str`:
//! boolean literals are checked before numeric parsing, and integer-looking
//! values never fall through to `float`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Type tag assigned to a single field value or expected for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Bool,
    Int,
    Float,
    Str,
}

impl TypeTag {
    /// All tags in declaration order.
    pub const ALL: [TypeTag; 4] = [TypeTag::Bool, TypeTag::Int, TypeTag::Float, TypeTag::Str];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
        }
    }

    /// True for `int` and `float`.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Rank used to break ties between equally voted tags: `str > float > int > bool`.
    pub fn tie_rank(self) -> u8 {
        match self {
            Self::Str => 3,
            Self::Float => 2,
            Self::Int => 1,
            Self::Bool => 0,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == lower)
            .ok_or_else(|| ModelError::UnknownTypeTag(s.to_string()))
    }
}

/// Classify a normalized field value.
///
/// Empty strings classify as `str`.
pub fn classify(value: &str) -> TypeTag {
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        return TypeTag::Bool;
    }
    if is_integer_literal(value) {
        return TypeTag::Int;
    }
    if is_float_literal(value) {
        return TypeTag::Float;
    }
    TypeTag::Str
}

/// Parse a value that classifies as `int` or `float`.
///
/// Integer literals too long for a finite `f64` give `None`.
pub fn parse_numeric(value: &str) -> Option<f64> {
    if classify(value).is_numeric() {
        parse_finite(value)
    } else {
        None
    }
}

pub(crate) fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_integer_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_float_literal(value: &str) -> bool {
    // "inf", "NaN" and overflowing exponents such as "1e999" are text.
    value.bytes().any(|b| b.is_ascii_digit()) && parse_finite(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_boolean_literals_case_insensitively() {
        assert_eq!(classify("true"), TypeTag::Bool);
        assert_eq!(classify("True"), TypeTag::Bool);
        assert_eq!(classify("FALSE"), TypeTag::Bool);
        assert_eq!(classify("yes"), TypeTag::Str);
    }

    #[test]
    fn classifies_integers_before_floats() {
        assert_eq!(classify("42"), TypeTag::Int);
        assert_eq!(classify("-7"), TypeTag::Int);
        assert_eq!(classify("+3"), TypeTag::Int);
        assert_eq!(classify("007"), TypeTag::Int);
        assert_eq!(classify("99999999999999999999999"), TypeTag::Int);
    }

    #[test]
    fn classifies_decimal_and_exponential_floats() {
        assert_eq!(classify("3.14"), TypeTag::Float);
        assert_eq!(classify("-0.5"), TypeTag::Float);
        assert_eq!(classify("1e5"), TypeTag::Float);
        assert_eq!(classify(".5"), TypeTag::Float);
    }

    #[test]
    fn everything_else_is_text() {
        assert_eq!(classify(""), TypeTag::Str);
        assert_eq!(classify("abc"), TypeTag::Str);
        assert_eq!(classify("-"), TypeTag::Str);
        assert_eq!(classify("inf"), TypeTag::Str);
        assert_eq!(classify("NaN"), TypeTag::Str);
        assert_eq!(classify("1,000"), TypeTag::Str);
        assert_eq!(classify("1e999"), TypeTag::Str);
        assert_eq!(classify("-1e999"), TypeTag::Str);
    }

    #[test]
    fn parses_only_numeric_values() {
        assert_eq!(parse_numeric("2.5"), Some(2.5));
        assert_eq!(parse_numeric("-4"), Some(-4.0));
        assert_eq!(parse_numeric("true"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("1e999"), None);
        assert_eq!(parse_numeric(&"9".repeat(400)), None);
    }

    #[test]
    fn type_tag_from_str() {
        assert_eq!("INT".parse::<TypeTag>(), Ok(TypeTag::Int));
        assert!("decimal".parse::<TypeTag>().is_err());
    }
}
