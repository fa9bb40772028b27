use csvise_model::{CaseStyle, Table};

use super::{StepOutput, describe_scope, resolve_columns};

/// Apply `style` to every non-empty targeted field.
pub fn standardize_case(table: &Table, style: CaseStyle, columns: Option<&[String]>) -> StepOutput {
    let indices = resolve_columns(table, columns);
    let out = StepOutput::rewrite_cells(table, &indices, |value| {
        (!value.is_empty()).then(|| style.apply(value))
    });
    let detail = format!(
        "Modified {} cells to {style} case in columns: {}",
        out.cells_modified,
        describe_scope(columns)
    );
    out.with_detail(detail)
}
