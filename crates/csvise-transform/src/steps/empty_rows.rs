use tracing::debug;

use csvise_model::{Row, Table};

use super::StepOutput;
use crate::error::{CleanError, Result};

/// Drop rows whose share of empty fields is at least `threshold`.
///
/// The share counts empty or absent fields among the first `column_count`
/// positions, divided by `column_count`. A table without columns treats
/// every row as fully empty.
///
/// # Errors
///
/// [`CleanError::InvalidThreshold`] when `threshold` is outside `[0.0, 1.0]`.
pub fn remove_empty_rows(table: &Table, threshold: f64) -> Result<StepOutput> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(CleanError::InvalidThreshold { threshold });
    }

    let column_count = table.column_count();
    let mut kept = Vec::with_capacity(table.row_count());
    let mut removed = Vec::new();
    for row in table.rows() {
        let ratio = empty_ratio(row, column_count);
        if ratio >= threshold {
            debug!(row = row.position, ratio, "empty row removed");
            removed.push(row.position);
        } else {
            kept.push(row.clone());
        }
    }

    let rows_removed = removed.len();
    Ok(StepOutput {
        rows: kept,
        affected_rows: removed,
        cells_modified: 0,
        rows_removed,
        detail: format!(
            "Removed {rows_removed} rows with {}% or more empty cells",
            threshold * 100.0
        ),
    })
}

fn empty_ratio(row: &Row, column_count: usize) -> f64 {
    if column_count == 0 {
        return 1.0;
    }
    let empty = (0..column_count).filter(|&i| row.is_missing(i)).count();
    empty as f64 / column_count as f64
}
