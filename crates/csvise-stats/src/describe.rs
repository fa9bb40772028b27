//! Per-column descriptive statistics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use csvise_model::{Table, TypeTag};

use crate::error::Result;
use crate::numeric;
use crate::{column_index, count_values, numeric_cells, present_values};

/// Divisor used for variance and standard deviation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deviation {
    /// Divide by `n`.
    #[default]
    Population,
    /// Divide by `n - 1`.
    Sample,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsOptions {
    pub deviation: Deviation,
}

impl StatsOptions {
    pub fn sample() -> Self {
        Self {
            deviation: Deviation::Sample,
        }
    }
}

/// Summary of the numeric values of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub q1: f64,
    pub q3: f64,
    pub range: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Frequency summary of a non-numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub most_common: Option<ValueCount>,
    pub least_common: Option<ValueCount>,
    /// Shannon entropy in bits.
    pub entropy: f64,
}

/// Statistics for one column.
///
/// Rows too short to reach the column count as empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub name: String,
    pub expected: TypeTag,
    pub total: usize,
    pub non_empty: usize,
    pub empty: usize,
    pub unique: usize,
    pub missing_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalSummary>,
}

/// Describe the column named `column`.
pub fn describe(table: &Table, column: &str, options: &StatsOptions) -> Result<ColumnStats> {
    let index = column_index(table, column)?;
    Ok(describe_index(table, index, options))
}

/// Describe the named columns, or every column when `columns` is `None`.
pub fn describe_all(
    table: &Table,
    columns: Option<&[String]>,
    options: &StatsOptions,
) -> Result<Vec<ColumnStats>> {
    match columns {
        Some(names) => names
            .iter()
            .map(|name| describe(table, name, options))
            .collect(),
        None => Ok((0..table.column_count())
            .map(|index| describe_index(table, index, options))
            .collect()),
    }
}

fn describe_index(table: &Table, index: usize, options: &StatsOptions) -> ColumnStats {
    let (name, expected) = table
        .column(index)
        .map_or((String::new(), TypeTag::Str), |c| (c.name.clone(), c.expected));
    let present = present_values(table, index);
    let counts = count_values(&present);
    let total = table.row_count();
    let empty = total - present.len();

    let (numeric, categorical) = if expected.is_numeric() {
        let values: Vec<f64> = numeric_cells(table, index).into_iter().map(|(_, v)| v).collect();
        (summarize_numeric(&values, options.deviation), None)
    } else {
        (None, Some(summarize_categorical(&counts, present.len())))
    };

    debug!(column = %name, total, empty, unique = counts.len(), "described column");
    ColumnStats {
        name,
        expected,
        total,
        non_empty: present.len(),
        empty,
        unique: counts.len(),
        missing_percentage: percentage(empty, total),
        numeric,
        categorical,
    }
}

fn summarize_numeric(values: &[f64], deviation: Deviation) -> Option<NumericSummary> {
    let sorted = numeric::sorted(values);
    let (&min, &max) = (sorted.first()?, sorted.last()?);
    let variance = numeric::variance(values, deviation == Deviation::Sample)?;
    Some(NumericSummary {
        count: values.len(),
        mean: numeric::mean(values)?,
        median: numeric::quantile(&sorted, 0.5)?,
        mode: numeric::mode(values)?,
        min,
        max,
        std_dev: variance.sqrt(),
        variance,
        q1: numeric::quantile(&sorted, 0.25)?,
        q3: numeric::quantile(&sorted, 0.75)?,
        range: max - min,
    })
}

fn summarize_categorical(counts: &[(&str, usize)], total: usize) -> CategoricalSummary {
    let to_value = |&(value, count): &(&str, usize)| ValueCount {
        value: value.to_string(),
        count,
    };
    // Ties resolve to the first value seen for both ends.
    let most = counts
        .iter()
        .fold(None::<&(&str, usize)>, |best, c| match best {
            Some(b) if b.1 >= c.1 => Some(b),
            _ => Some(c),
        });
    let least = counts
        .iter()
        .fold(None::<&(&str, usize)>, |best, c| match best {
            Some(b) if b.1 <= c.1 => Some(b),
            _ => Some(c),
        });
    let entropy = if total == 0 {
        0.0
    } else {
        counts
            .iter()
            .map(|&(_, count)| {
                let p = count as f64 / total as f64;
                -p * p.log2()
            })
            .sum()
    };
    CategoricalSummary {
        most_common: most.map(to_value),
        least_common: least.map(to_value),
        entropy,
    }
}

pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
