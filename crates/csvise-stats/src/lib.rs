//! Descriptive statistics over csvise tables.
//!
//! Numeric operations work on columns whose expected type is `int` or
//! `float`, and only on the values in those columns that classify as
//! numeric. Everything here is a pure read of the table.

pub mod correlation;
pub mod describe;
pub mod distribution;
pub mod error;
mod numeric;
pub mod outliers;
pub mod quality;

pub use correlation::{Correlation, CorrelationMatrix, correlation_matrix};
pub use describe::{
    CategoricalSummary, ColumnStats, Deviation, NumericSummary, StatsOptions, ValueCount,
    describe, describe_all,
};
pub use distribution::{Distribution, ValueFrequency, categorical_distributions, value_distribution};
pub use error::{Result, StatsError};
pub use outliers::{Outlier, OutlierMethod, OutlierReport, detect_outliers};
pub use quality::{QualityReport, quality_report};

use std::collections::HashMap;

use csvise_model::{Field, Table};

/// Index of the column named `name`.
pub(crate) fn column_index(table: &Table, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| StatsError::ColumnNotFound {
            name: name.to_string(),
        })
}

/// `(row position, value)` for every numeric value in the column.
pub(crate) fn numeric_cells(table: &Table, index: usize) -> Vec<(usize, f64)> {
    table
        .column_cells(index)
        .filter_map(|(position, field)| field?.as_f64().map(|v| (position, v)))
        .collect()
}

/// Non-empty values of the column in row order.
pub(crate) fn present_values(table: &Table, index: usize) -> Vec<&str> {
    table
        .column_cells(index)
        .filter_map(|(_, field)| field.filter(|f| !f.is_empty()).map(Field::value))
        .collect()
}

/// Distinct values with their counts, in first-seen order.
pub(crate) fn count_values<'a>(values: &[&'a str]) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    for &value in values {
        match slots.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts
}
