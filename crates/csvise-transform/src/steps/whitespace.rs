use tracing::debug;

use csvise_model::Table;

use super::{StepOutput, describe_scope, resolve_columns};

/// Trim every targeted field and collapse internal whitespace runs to one space.
pub fn normalize_whitespace(table: &Table, columns: Option<&[String]>) -> StepOutput {
    let indices = resolve_columns(table, columns);
    let out = StepOutput::rewrite_cells(table, &indices, |value| Some(collapse(value)));
    debug!(cells = out.cells_modified, "whitespace normalized");
    let detail = format!(
        "Modified {} cells in columns: {}",
        out.cells_modified,
        describe_scope(columns)
    );
    out.with_detail(detail)
}

fn collapse(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::test_support::{table, values};
    use csvise_model::TypeTag;

    #[test]
    fn collapses_internal_runs() {
        let t = table(
            &["city", "note"],
            &[TypeTag::Str, TypeTag::Str],
            &[&["New   York", "a\t\tb"], &["Oslo", "ok"]],
        );
        let out = normalize_whitespace(&t, None);
        assert_eq!(values(&out.rows), vec![vec!["New York", "a b"], vec!["Oslo", "ok"]]);
        assert_eq!(out.cells_modified, 2);
        assert_eq!(out.affected_rows, vec![1]);
    }

    #[test]
    fn respects_column_scope() {
        let t = table(
            &["a", "b"],
            &[TypeTag::Str, TypeTag::Str],
            &[&["x  y", "x  y"]],
        );
        let scope = vec!["b".to_string()];
        let out = normalize_whitespace(&t, Some(&scope));
        assert_eq!(values(&out.rows), vec![vec!["x  y", "x y"]]);
    }
}
