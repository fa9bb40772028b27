//! Dataset-level quality scores.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use csvise_model::Table;

/// Completeness, consistency and uniqueness scores in `[0, 1]`.
///
/// Every score is `0.0` for a table without rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub total_rows: usize,
    pub total_columns: usize,
    pub total_cells: usize,
    /// Empty or absent cells within the header width.
    pub empty_cells: usize,
    pub duplicate_rows: usize,
    /// Rows whose length differs from the header.
    pub inconsistent_rows: usize,
    pub missing_percentage: f64,
    pub completeness: f64,
    pub consistency: f64,
    pub uniqueness: f64,
    /// Mean of the three scores.
    pub overall: f64,
}

pub fn quality_report(table: &Table) -> QualityReport {
    let total_rows = table.row_count();
    let total_columns = table.column_count();
    let total_cells = total_rows * total_columns;

    let mut empty_cells = 0;
    let mut inconsistent_rows = 0;
    let mut duplicate_rows = 0;
    let mut seen: HashSet<Vec<&str>> = HashSet::new();
    for row in table.rows() {
        empty_cells += (0..total_columns).filter(|&i| row.is_missing(i)).count();
        if row.len() != total_columns {
            inconsistent_rows += 1;
        }
        if !seen.insert(row.values().collect()) {
            duplicate_rows += 1;
        }
    }

    let ratio = |good: usize, total: usize| {
        if total == 0 {
            0.0
        } else {
            good as f64 / total as f64
        }
    };
    let completeness = ratio(total_cells - empty_cells, total_cells);
    let consistency = ratio(total_rows - inconsistent_rows, total_rows);
    let uniqueness = ratio(total_rows - duplicate_rows, total_rows);
    let overall = (completeness + consistency + uniqueness) / 3.0;
    debug!(completeness, consistency, uniqueness, overall, "quality scores");

    QualityReport {
        total_rows,
        total_columns,
        total_cells,
        empty_cells,
        duplicate_rows,
        inconsistent_rows,
        missing_percentage: ratio(empty_cells, total_cells) * 100.0,
        completeness,
        consistency,
        uniqueness,
        overall,
    }
}
