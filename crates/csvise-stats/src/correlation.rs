//! Pearson correlation between numeric columns.

use serde::Serialize;
use tracing::debug;

use csvise_model::{Field, Table, TypeTag};

use crate::error::{Result, StatsError};
use crate::{column_index, numeric};

/// Correlation of one column pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Correlation {
    Value(f64),
    /// Fewer than two shared numeric rows, or zero variance on either side.
    NotApplicable,
}

impl Correlation {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(r) => Some(r),
            Self::NotApplicable => None,
        }
    }
}

/// Square, symmetric matrix of pairwise correlations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Correlation>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, column: usize) -> Option<Correlation> {
        self.values.get(row)?.get(column).copied()
    }

    pub fn get_by_name(&self, a: &str, b: &str) -> Option<Correlation> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.get(i, j)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Correlate every pair of the named numeric columns, or of all numeric
/// columns when `columns` is `None`.
///
/// Each pair uses only the rows where both values are numeric.
///
/// # Errors
///
/// [`StatsError::ColumnNotFound`] for an unknown name and
/// [`StatsError::NotNumeric`] for a named column that is not numeric.
pub fn correlation_matrix(table: &Table, columns: Option<&[String]>) -> Result<CorrelationMatrix> {
    let indices: Vec<usize> = match columns {
        Some(names) => names
            .iter()
            .map(|name| {
                let index = column_index(table, name)?;
                let expected = table.column(index).map_or(TypeTag::Str, |c| c.expected);
                if expected.is_numeric() {
                    Ok(index)
                } else {
                    Err(StatsError::NotNumeric {
                        column: name.clone(),
                        found: expected,
                    })
                }
            })
            .collect::<Result<_>>()?,
        None => table
            .columns()
            .iter()
            .filter(|c| c.expected.is_numeric())
            .map(|c| c.index)
            .collect(),
    };

    let cells: Vec<Vec<Option<f64>>> = indices
        .iter()
        .map(|&index| numeric_column(table, index))
        .collect();

    let n = indices.len();
    let mut values = vec![vec![Correlation::NotApplicable; n]; n];
    for i in 0..n {
        for j in i..n {
            let pairs: Vec<(f64, f64)> = cells[i]
                .iter()
                .zip(&cells[j])
                .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                .collect();
            let r = match numeric::pearson(&pairs) {
                Some(_) if i == j => Correlation::Value(1.0),
                Some(r) => Correlation::Value(r),
                None => Correlation::NotApplicable,
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    let names: Vec<String> = indices
        .iter()
        .filter_map(|&index| table.column(index).map(|c| c.name.clone()))
        .collect();
    debug!(columns = ?names, "computed correlation matrix");
    Ok(CorrelationMatrix {
        columns: names,
        values,
    })
}

/// Numeric value per row, aligned with the table body.
fn numeric_column(table: &Table, index: usize) -> Vec<Option<f64>> {
    table
        .column_cells(index)
        .map(|(_, field)| field.and_then(Field::as_f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvise_model::{Row, Schema};

    fn table() -> Table {
        let rows = [
            vec!["1", "2", "9", "a", "4"],
            vec!["2", "4", "7", "b", "4"],
            vec!["3", "6", "", "c", "4"],
            vec!["4", "8", "1", "d", "4"],
            vec!["x", "10", "0", "e", "4"],
        ];
        Table::new(
            ["a", "b", "c", "label", "flat"].map(String::from).to_vec(),
            &Schema::new(vec![
                TypeTag::Int,
                TypeTag::Int,
                TypeTag::Int,
                TypeTag::Str,
                TypeTag::Int,
            ]),
            rows.into_iter()
                .enumerate()
                .map(|(i, v)| Row::from_values(i + 1, v))
                .collect(),
            ",",
        )
    }

    #[test]
    fn covers_numeric_columns_by_default() {
        let matrix = correlation_matrix(&table(), None).unwrap();
        assert_eq!(matrix.columns, vec!["a", "b", "c", "flat"]);
        assert_eq!(matrix.get_by_name("a", "a"), Some(Correlation::Value(1.0)));
        let ab = matrix.get_by_name("a", "b").and_then(Correlation::value).unwrap();
        assert!((ab - 1.0).abs() < 1e-12);
    }

    #[test]
    fn symmetric_and_pairwise_complete() {
        let matrix = correlation_matrix(&table(), None).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        // a and c share rows 1, 2 and 4 only.
        let ac = matrix.get_by_name("a", "c").and_then(Correlation::value).unwrap();
        assert!(ac < -0.9);
    }

    #[test]
    fn constant_column_is_not_applicable() {
        let matrix = correlation_matrix(&table(), None).unwrap();
        assert_eq!(matrix.get_by_name("flat", "flat"), Some(Correlation::NotApplicable));
        assert_eq!(matrix.get_by_name("a", "flat"), Some(Correlation::NotApplicable));
    }

    #[test]
    fn named_text_column_is_rejected() {
        let names = vec!["a".to_string(), "label".to_string()];
        let err = correlation_matrix(&table(), Some(&names)).unwrap_err();
        assert_eq!(
            err,
            StatsError::NotNumeric {
                column: "label".into(),
                found: TypeTag::Str
            }
        );
    }

    #[test]
    fn serializes_not_applicable_as_null() {
        let names = vec!["flat".to_string()];
        let matrix = correlation_matrix(&table(), Some(&names)).unwrap();
        let json = serde_json::to_value(&matrix).unwrap();
        assert!(json["values"][0][0].is_null());
    }
}
