//! Table views of the parsed rows.
//!
//! [`data_table`] builds the coloured terminal view. [`render_plain`] builds
//! the aligned plain-text layout used when saving the view to a file.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_BORDERS_ONLY, UTF8_FULL, UTF8_FULL_CONDENSED, UTF8_HORIZONTAL_ONLY};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table as TextTable};

use csvise_model::{CaseStyle, Field, Row, Table, TypeTag};
use csvise_validate::ValidationReport;

use crate::summary::{align_column, dim_cell, header_cell};

/// What part of the table to show and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// First data row shown, 1-based.
    pub start_index: usize,
    pub row_limit: Option<usize>,
    pub column_lines: bool,
    pub row_lines: bool,
    /// Applied to the header and every displayed value.
    pub case: Option<CaseStyle>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            start_index: 1,
            row_limit: None,
            column_lines: false,
            row_lines: false,
            case: None,
        }
    }
}

impl DisplayOptions {
    /// Rows selected by the start index and the row limit.
    pub fn visible_rows<'a>(&self, table: &'a Table) -> &'a [Row] {
        let rows = table.rows();
        let start = self.start_index.saturating_sub(1).min(rows.len());
        let end = self
            .row_limit
            .map_or(rows.len(), |limit| start.saturating_add(limit).min(rows.len()));
        &rows[start..end]
    }

    fn display(&self, value: &str) -> String {
        self.case
            .map_or_else(|| value.to_string(), |style| style.apply(value))
    }
}

/// Aligned plain-text rendering.
///
/// Every column is padded to the widest header or value across all rows,
/// not only the displayed ones. Extra fields of long rows are not shown and
/// short rows are padded with blanks. Trailing whitespace is trimmed from
/// every line. When `report` is given its text follows the table after a
/// blank line.
pub fn render_plain(
    table: &Table,
    options: &DisplayOptions,
    report: Option<&ValidationReport>,
) -> String {
    let widths = table.column_widths();
    let number_width = table.row_count().to_string().len();
    let separator = if options.column_lines { "|" } else { " " };
    let join = format!(" {separator} ");

    let pad_cells = |value_at: &dyn Fn(usize) -> String| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(index, &width)| format!("{:<width$}", value_at(index)))
            .collect::<Vec<_>>()
            .join(&join)
    };

    let mut lines: Vec<String> = Vec::new();
    let header = table.header();
    lines.push(format!(
        "{:number_width$} {separator} {}",
        "",
        pad_cells(&|index| options.display(header[index]))
    ));
    lines.push(format!(
        "{}{}",
        "-".repeat(number_width * 2 + 1),
        widths
            .iter()
            .map(|width| "-".repeat(width + 2))
            .collect::<Vec<_>>()
            .join("+")
    ));

    for row in options.visible_rows(table) {
        let line = format!(
            "{:<number_width$} {separator} {}",
            row.position,
            pad_cells(&|index| options.display(row.value(index).unwrap_or_default()))
        );
        let divider = options.row_lines.then(|| "-".repeat(line.chars().count()));
        lines.push(line);
        lines.extend(divider);
    }

    if let Some(report) = report {
        lines.push(String::new());
        lines.extend(report.render().lines().map(str::to_string));
    }

    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Coloured terminal rendering.
///
/// Values are coloured by their own type; cells flagged as type mismatches in
/// `report` are red. Fields missing from short rows show as a dim `-`.
pub fn data_table(
    table: &Table,
    options: &DisplayOptions,
    report: Option<&ValidationReport>,
) -> TextTable {
    let mut view = TextTable::new();
    let mut header = vec![header_cell("#")];
    header.extend(
        table
            .header()
            .into_iter()
            .map(|name| header_cell(&options.display(name))),
    );
    view.set_header(header);
    view.load_preset(preset(options))
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut view, 0, CellAlignment::Right);

    for row in options.visible_rows(table) {
        let mut cells = vec![dim_cell(row.position)];
        for column in 0..table.column_count() {
            let mismatch = report.is_some_and(|r| r.is_mismatch(row.position, column + 1));
            cells.push(value_cell(row.get(column), options, mismatch));
        }
        view.add_row(cells);
    }
    view
}

fn preset(options: &DisplayOptions) -> &'static str {
    match (options.column_lines, options.row_lines) {
        (true, true) => UTF8_FULL,
        (true, false) => UTF8_FULL_CONDENSED,
        (false, true) => UTF8_HORIZONTAL_ONLY,
        (false, false) => UTF8_BORDERS_ONLY,
    }
}

fn value_cell(field: Option<&Field>, options: &DisplayOptions, mismatch: bool) -> Cell {
    let Some(field) = field else {
        return dim_cell("-");
    };
    let cell = Cell::new(options.display(field.value()));
    if mismatch {
        return cell.fg(Color::Red).add_attribute(Attribute::Bold);
    }
    match field.tag() {
        TypeTag::Int | TypeTag::Float => cell.fg(Color::Green).set_alignment(CellAlignment::Right),
        TypeTag::Bool => cell.fg(Color::Magenta),
        TypeTag::Str => cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvise_model::Schema;

    fn sample() -> Table {
        let schema = Schema::new(vec![TypeTag::Str, TypeTag::Int]);
        Table::new(
            vec!["Name".to_string(), "Age".to_string()],
            &schema,
            vec![
                Row::from_values(1, ["Alice", "30"]),
                Row::from_values(2, ["Bob", "25"]),
                Row::from_values(3, ["Charlie"]),
            ],
            ",",
        )
    }

    #[test]
    fn visible_rows_follow_start_and_limit() {
        let table = sample();
        let options = DisplayOptions {
            start_index: 2,
            row_limit: Some(1),
            ..DisplayOptions::default()
        };
        let rows = options.visible_rows(&table);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].position, 2);
    }

    #[test]
    fn start_past_the_end_shows_nothing() {
        let table = sample();
        let options = DisplayOptions {
            start_index: 10,
            ..DisplayOptions::default()
        };
        assert!(options.visible_rows(&table).is_empty());
    }

    #[test]
    fn plain_layout_pads_columns() {
        let text = render_plain(&sample(), &DisplayOptions::default(), None);
        assert_eq!(
            text,
            "    Name      Age\n\
             ------------+-----\n\
             1   Alice     30\n\
             2   Bob       25\n\
             3   Charlie"
        );
    }

    #[test]
    fn column_lines_and_case_apply() {
        let options = DisplayOptions {
            row_limit: Some(1),
            column_lines: true,
            row_lines: true,
            case: Some(CaseStyle::Upper),
            ..DisplayOptions::default()
        };
        let text = render_plain(&sample(), &options, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  | NAME    | AGE");
        assert_eq!(lines[2], "1 | ALICE   | 30");
        assert_eq!(lines[3], "-".repeat(lines[2].len() + 1));
        assert_eq!(lines.len(), 4);
    }
}
