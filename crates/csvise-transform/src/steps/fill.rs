use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

use csvise_model::{Field, Table, parse_numeric};

use super::{StepOutput, describe_scope, resolve_columns};
use crate::error::{CleanError, Result};

/// How a missing field is filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillStrategy {
    /// A literal replacement.
    Value(String),
    /// The empty string; pads absent fields.
    Empty,
    /// Most frequent non-empty value, ties by first seen.
    Mode,
    Mean,
    Median,
}

impl FillStrategy {
    /// Mean and median need a numeric column.
    pub fn requires_numeric(&self) -> bool {
        matches!(self, Self::Mean | Self::Median)
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(text) => write!(f, "value={text}"),
            Self::Empty => f.write_str("empty"),
            Self::Mode => f.write_str("mode"),
            Self::Mean => f.write_str("mean"),
            Self::Median => f.write_str("median"),
        }
    }
}

/// Fill empty or absent fields in the targeted columns.
///
/// Absent fields are filled by padding the row with empty fields up to the
/// column. Columns without any non-empty value are left untouched.
///
/// # Errors
///
/// [`CleanError::UnsupportedFillStrategy`] when a numeric strategy targets a
/// column whose expected type is not numeric. No row is modified in that case.
pub fn fill_missing(
    table: &Table,
    strategy: &FillStrategy,
    columns: Option<&[String]>,
) -> Result<StepOutput> {
    let indices = resolve_columns(table, columns);
    if strategy.requires_numeric() {
        for column in indices.iter().filter_map(|&index| table.column(index)) {
            if !column.expected.is_numeric() {
                return Err(CleanError::UnsupportedFillStrategy {
                    column: column.name.clone(),
                    strategy: strategy.to_string(),
                    expected: column.expected,
                });
            }
        }
    }

    let mut rows = table.rows().to_vec();
    let mut affected = BTreeSet::new();
    let mut cells_modified = 0;
    let mut skipped: Vec<&str> = Vec::new();

    for &index in &indices {
        let name = table.column(index).map_or("", |c| c.name.as_str());
        let Some(fill) = fill_value(table, index, strategy) else {
            warn!(column = name, "column has no values, nothing to fill from");
            skipped.push(name);
            continue;
        };
        debug!(column = name, fill = %fill, "filling missing values");
        for row in &mut rows {
            if row.is_missing(index) && row.value(index) != Some(fill.as_str()) {
                row.set_value(index, fill.clone());
                affected.insert(row.position);
                cells_modified += 1;
            }
        }
    }

    let mut detail = format!(
        "Filled {cells_modified} cells using strategy {strategy} in columns: {}",
        describe_scope(columns)
    );
    if !skipped.is_empty() {
        detail.push_str(&format!("; skipped empty columns: {}", skipped.join(", ")));
    }
    Ok(StepOutput {
        rows,
        affected_rows: affected.into_iter().collect(),
        cells_modified,
        rows_removed: 0,
        detail,
    })
}

fn fill_value(table: &Table, index: usize, strategy: &FillStrategy) -> Option<String> {
    let present: Vec<&str> = table
        .column_cells(index)
        .filter_map(|(_, field)| field)
        .filter(|field| !field.is_empty())
        .map(Field::value)
        .collect();
    if present.is_empty() {
        return None;
    }
    match strategy {
        FillStrategy::Value(text) => Some(text.clone()),
        FillStrategy::Empty => Some(String::new()),
        FillStrategy::Mode => mode(&present).map(str::to_string),
        FillStrategy::Mean => {
            let numbers = numeric(&present);
            (!numbers.is_empty())
                .then(|| format_number(numbers.iter().sum::<f64>() / numbers.len() as f64))
        }
        FillStrategy::Median => median(numeric(&present)).map(format_number),
    }
}

fn numeric(values: &[&str]) -> Vec<f64> {
    values.iter().filter_map(|v| parse_numeric(v)).collect()
}

fn mode<'a>(values: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    let mut best: Option<(&'a str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    })
}

/// Integral values render without a fractional part.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
