//! Individual cleaning steps.
//!
//! Each step is a pure function of the table. It returns the rewritten row
//! body together with the numbers recorded in the cleaning log.

mod case;
mod dates;
mod dedupe;
mod empty_rows;
mod fill;
mod whitespace;

pub use case::standardize_case;
pub use dates::{DateFormat, normalize_dates};
pub use dedupe::remove_duplicates;
pub use empty_rows::remove_empty_rows;
pub use fill::{FillStrategy, fill_missing};
pub use whitespace::normalize_whitespace;

use tracing::warn;

use csvise_model::{Row, Table};

/// Rows produced by one step plus what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    pub rows: Vec<Row>,
    /// 1-based input positions of rows that were modified or removed.
    pub affected_rows: Vec<usize>,
    pub cells_modified: usize,
    pub rows_removed: usize,
    pub detail: String,
}

impl StepOutput {
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Rewrite present fields in the given columns. `rewrite` returns the new
    /// value, or `None` to leave a field alone.
    fn rewrite_cells<F>(table: &Table, columns: &[usize], mut rewrite: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut rows = table.rows().to_vec();
        let mut affected_rows = Vec::new();
        let mut cells_modified = 0;
        for row in &mut rows {
            let mut touched = false;
            for &index in columns {
                let Some(current) = row.value(index) else {
                    continue;
                };
                let Some(updated) = rewrite(current).filter(|v| v != current) else {
                    continue;
                };
                row.set_value(index, updated);
                cells_modified += 1;
                touched = true;
            }
            if touched {
                affected_rows.push(row.position);
            }
        }
        Self {
            rows,
            affected_rows,
            cells_modified,
            rows_removed: 0,
            detail: String::new(),
        }
    }
}

/// Column indices for an optional list of names. `None` selects every column;
/// unknown names are logged and skipped.
pub(crate) fn resolve_columns(table: &Table, columns: Option<&[String]>) -> Vec<usize> {
    let Some(names) = columns else {
        return (0..table.column_count()).collect();
    };
    let mut indices: Vec<usize> = Vec::with_capacity(names.len());
    for name in names {
        match table.column_index(name) {
            Some(index) if !indices.contains(&index) => indices.push(index),
            Some(_) => {}
            None => warn!(column = %name, "column not found, ignored"),
        }
    }
    indices
}

/// Human-readable scope for log details.
pub(crate) fn describe_scope(columns: Option<&[String]>) -> String {
    match columns {
        Some(names) if !names.is_empty() => names.join(", "),
        _ => "all".to_string(),
    }
}
