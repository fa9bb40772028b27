//! Length and type checks.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use csvise_model::{Row, Table, TypeTag, ValidationFinding};

use crate::report::ValidationReport;

/// Switches for [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Compare each field's type with its column's expected type.
    pub check_types: bool,
    /// Require identical tags; otherwise `int` and `float` conform to each other.
    pub strict_numeric: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_types: true,
            strict_numeric: false,
        }
    }
}

impl ValidationOptions {
    pub fn with_type_checks(mut self, enabled: bool) -> Self {
        self.check_types = enabled;
        self
    }

    pub fn with_strict_numeric(mut self, strict: bool) -> Self {
        self.strict_numeric = strict;
        self
    }
}

/// Whether a value tagged `found` is acceptable in a column expecting `expected`.
pub fn conforms(found: TypeTag, expected: TypeTag, strict_numeric: bool) -> bool {
    found == expected || (!strict_numeric && found.is_numeric() && expected.is_numeric())
}

/// Check every row for length and type conformance.
pub fn validate(table: &Table, options: &ValidationOptions) -> ValidationReport {
    let expected_len = table.column_count();
    let mut report = ValidationReport::new(expected_len);

    for row in table.rows() {
        check_length(row, expected_len, &mut report);
        if options.check_types {
            check_types(table, row, options.strict_numeric, &mut report);
        }
    }

    info!(
        rows = table.row_count(),
        length_mismatches = report.length_mismatches(),
        type_mismatches = report.type_mismatches(),
        "validation complete"
    );
    report
}

fn check_length(row: &Row, expected_len: usize, report: &mut ValidationReport) {
    if row.len() != expected_len {
        debug!(row = row.position, actual = row.len(), expected = expected_len, "row length mismatch");
        report.add(ValidationFinding::LengthMismatch {
            row: row.position,
            actual_len: row.len(),
            expected_len,
        });
    }
}

fn check_types(table: &Table, row: &Row, strict_numeric: bool, report: &mut ValidationReport) {
    // Fields past the header are covered by the length finding.
    for (field, column) in row.fields.iter().zip(table.columns()) {
        if !conforms(field.tag(), column.expected, strict_numeric) {
            report.add(ValidationFinding::TypeMismatch {
                row: row.position,
                column: column.index + 1,
                found: field.tag(),
                expected: column.expected,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvise_model::Schema;

    fn table(types: Vec<TypeTag>, rows: Vec<Row>) -> Table {
        let header = (1..=types.len()).map(|i| format!("c{i}")).collect();
        Table::new(header, &Schema::new(types), rows, ",")
    }

    #[test]
    fn short_row_reports_length_only() {
        let table = table(
            vec![TypeTag::Str, TypeTag::Int, TypeTag::Str],
            vec![Row::from_values(3, ["Charlie", "Manager"])],
        );
        let report = validate(&table, &ValidationOptions::default().with_type_checks(false));
        assert_eq!(
            report.findings(),
            &[ValidationFinding::LengthMismatch {
                row: 3,
                actual_len: 2,
                expected_len: 3
            }]
        );
    }

    #[test]
    fn extra_fields_are_not_type_checked() {
        let table = table(
            vec![TypeTag::Int],
            vec![Row::from_values(1, ["1", "text", "true"])],
        );
        let report = validate(&table, &ValidationOptions::default());
        assert_eq!(report.length_mismatches(), 1);
        assert_eq!(report.type_mismatches(), 0);
    }

    #[test]
    fn numeric_tags_conform_unless_strict() {
        assert!(conforms(TypeTag::Float, TypeTag::Int, false));
        assert!(conforms(TypeTag::Int, TypeTag::Float, false));
        assert!(!conforms(TypeTag::Float, TypeTag::Int, true));
        assert!(!conforms(TypeTag::Bool, TypeTag::Int, false));
        assert!(!conforms(TypeTag::Str, TypeTag::Float, false));
    }

    #[test]
    fn strict_numeric_flags_float_in_int_column() {
        let table = table(
            vec![TypeTag::Int],
            vec![Row::from_values(1, ["1"]), Row::from_values(2, ["40.5"])],
        );
        let lenient = validate(&table, &ValidationOptions::default());
        assert_eq!(lenient.type_mismatches(), 0);

        let strict = validate(&table, &ValidationOptions::default().with_strict_numeric(true));
        assert_eq!(
            strict.findings(),
            &[ValidationFinding::TypeMismatch {
                row: 2,
                column: 1,
                found: TypeTag::Float,
                expected: TypeTag::Int
            }]
        );
    }

    #[test]
    fn empty_value_in_numeric_column_is_a_mismatch() {
        let table = table(vec![TypeTag::Int], vec![Row::from_values(1, [""])]);
        let report = validate(&table, &ValidationOptions::default());
        assert_eq!(report.type_mismatches(), 1);
    }
}
