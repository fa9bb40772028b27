//! Univariate outlier detection.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use csvise_model::{Table, TypeTag};

use crate::error::{Result, StatsError};
use crate::{column_index, numeric, numeric_cells};

/// Fewest numeric values either method will work with.
pub const MIN_VALUES: usize = 4;

/// Method for flagging outliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum OutlierMethod {
    /// Tukey fences: outside `[Q1 - k*IQR, Q3 + k*IQR]`.
    Iqr { k: f64 },
    /// `|z| > threshold`, using the sample standard deviation.
    ZScore { threshold: f64 },
}

impl OutlierMethod {
    pub const DEFAULT_IQR_K: f64 = 1.5;
    pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

    pub fn iqr() -> Self {
        Self::Iqr {
            k: Self::DEFAULT_IQR_K,
        }
    }

    pub fn zscore() -> Self {
        Self::ZScore {
            threshold: Self::DEFAULT_Z_THRESHOLD,
        }
    }
}

impl Default for OutlierMethod {
    fn default() -> Self {
        Self::iqr()
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iqr { k } => write!(f, "IQR (k = {k})"),
            Self::ZScore { threshold } => write!(f, "z-score (threshold = {threshold})"),
        }
    }
}

/// A flagged value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outlier {
    /// 1-based row position.
    pub row: usize,
    pub value: f64,
    /// Distance past the nearer fence in IQRs, or `|z|`.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutlierReport {
    Detected {
        column: String,
        method: OutlierMethod,
        values_checked: usize,
        lower_bound: f64,
        upper_bound: f64,
        outliers: Vec<Outlier>,
    },
    InsufficientData {
        column: String,
        required: usize,
        actual: usize,
    },
}

impl OutlierReport {
    pub fn outliers(&self) -> &[Outlier] {
        match self {
            Self::Detected { outliers, .. } => outliers,
            Self::InsufficientData { .. } => &[],
        }
    }

    /// Share of checked values that were flagged, in percent.
    pub fn percentage(&self) -> f64 {
        match self {
            Self::Detected {
                values_checked,
                outliers,
                ..
            } if *values_checked > 0 => outliers.len() as f64 / *values_checked as f64 * 100.0,
            _ => 0.0,
        }
    }
}

/// Flag outliers among the numeric values of `column`.
///
/// # Errors
///
/// [`StatsError::ColumnNotFound`] or [`StatsError::NotNumeric`] when the
/// column's expected type is not numeric.
pub fn detect_outliers(table: &Table, column: &str, method: OutlierMethod) -> Result<OutlierReport> {
    let index = column_index(table, column)?;
    let expected = table.column(index).map_or(TypeTag::Str, |c| c.expected);
    if !expected.is_numeric() {
        return Err(StatsError::NotNumeric {
            column: column.to_string(),
            found: expected,
        });
    }

    let cells = numeric_cells(table, index);
    if cells.len() < MIN_VALUES {
        return Ok(OutlierReport::InsufficientData {
            column: column.to_string(),
            required: MIN_VALUES,
            actual: cells.len(),
        });
    }
    let values: Vec<f64> = cells.iter().map(|&(_, v)| v).collect();

    let (lower_bound, upper_bound, outliers) = match method {
        OutlierMethod::Iqr { k } => iqr_fences(&cells, &values, k),
        OutlierMethod::ZScore { threshold } => zscore_bounds(&cells, &values, threshold),
    };
    debug!(column, %method, flagged = outliers.len(), "outlier detection complete");
    Ok(OutlierReport::Detected {
        column: column.to_string(),
        method,
        values_checked: values.len(),
        lower_bound,
        upper_bound,
        outliers,
    })
}

fn iqr_fences(cells: &[(usize, f64)], values: &[f64], k: f64) -> (f64, f64, Vec<Outlier>) {
    let sorted = numeric::sorted(values);
    let q1 = numeric::quantile(&sorted, 0.25).unwrap_or(0.0);
    let q3 = numeric::quantile(&sorted, 0.75).unwrap_or(0.0);
    let iqr = q3 - q1;
    let lower = q1 - k * iqr;
    let upper = q3 + k * iqr;
    let scale = iqr.max(f64::EPSILON);
    let outliers = cells
        .iter()
        .filter_map(|&(row, value)| {
            let score = if value < lower {
                (lower - value) / scale
            } else if value > upper {
                (value - upper) / scale
            } else {
                return None;
            };
            Some(Outlier { row, value, score })
        })
        .collect();
    (lower, upper, outliers)
}

fn zscore_bounds(cells: &[(usize, f64)], values: &[f64], threshold: f64) -> (f64, f64, Vec<Outlier>) {
    let mean = numeric::mean(values).unwrap_or(0.0);
    let std_dev = numeric::variance(values, true).unwrap_or(0.0).sqrt();
    let bounds = (mean - threshold * std_dev, mean + threshold * std_dev);
    if std_dev == 0.0 {
        return (bounds.0, bounds.1, Vec::new());
    }
    let outliers = cells
        .iter()
        .filter_map(|&(row, value)| {
            let z = ((value - mean) / std_dev).abs();
            (z > threshold).then_some(Outlier {
                row,
                value,
                score: z,
            })
        })
        .collect();
    (bounds.0, bounds.1, outliers)
}
