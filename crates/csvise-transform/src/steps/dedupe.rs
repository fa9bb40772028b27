use std::collections::HashSet;

use tracing::{debug, warn};

use csvise_model::Table;

use super::{StepOutput, describe_scope, resolve_columns};

/// Drop rows whose key equals that of an earlier kept row.
///
/// The key is the values of `columns` (absent fields count as empty), or of
/// every column when unscoped. The first occurrence is kept and order is
/// preserved. When none of the named columns exist every column is used.
pub fn remove_duplicates(table: &Table, columns: Option<&[String]>) -> StepOutput {
    let mut indices = resolve_columns(table, columns);
    if indices.is_empty() {
        if columns.is_some() {
            warn!("no valid columns for duplicate detection, using all columns");
        }
        indices = (0..table.column_count()).collect();
    }

    let mut seen: HashSet<Vec<&str>> = HashSet::new();
    let mut kept = Vec::with_capacity(table.row_count());
    let mut removed = Vec::new();
    for row in table.rows() {
        let key: Vec<&str> = indices
            .iter()
            .map(|&index| row.value(index).unwrap_or(""))
            .collect();
        if seen.insert(key) {
            kept.push(row.clone());
        } else {
            debug!(row = row.position, "duplicate row removed");
            removed.push(row.position);
        }
    }

    let rows_removed = removed.len();
    StepOutput {
        rows: kept,
        affected_rows: removed,
        cells_modified: 0,
        rows_removed,
        detail: format!(
            "Removed {rows_removed} duplicate rows using columns: {}",
            describe_scope(columns)
        ),
    }
}
