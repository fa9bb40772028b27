//! comfy-table views of analysis results.

use clap::ColorChoice;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use csvise_stats::{
    ColumnStats, Correlation, CorrelationMatrix, Distribution, OutlierReport, QualityReport,
};

/// Correlations at or beyond this magnitude are highlighted.
const STRONG_CORRELATION: f64 = 0.7;

pub fn stats_table(stats: &[ColumnStats]) -> Table {
    let mut table = Table::new();
    table.set_header(
        [
            "Column", "Type", "Non-empty", "Empty", "Unique", "Missing %", "Mean", "Median",
            "Std dev", "Min", "Max", "Most common",
        ]
        .map(header_cell),
    );
    apply_table_style(&mut table);
    for index in 2..=10 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for column in stats {
        let mut cells = vec![
            Cell::new(&column.name).add_attribute(Attribute::Bold),
            dim_cell(column.expected),
            Cell::new(column.non_empty),
            count_cell(column.empty, Color::Yellow),
            Cell::new(column.unique),
            Cell::new(format!("{:.1}", column.missing_percentage)),
        ];
        match &column.numeric {
            Some(summary) => cells.extend(
                [
                    summary.mean,
                    summary.median,
                    summary.std_dev,
                    summary.min,
                    summary.max,
                ]
                .map(|value| Cell::new(format_number(value))),
            ),
            None => cells.extend((0..5).map(|_| dim_cell("-"))),
        }
        let most_common = column
            .categorical
            .as_ref()
            .and_then(|c| c.most_common.as_ref())
            .map_or_else(
                || dim_cell("-"),
                |top| Cell::new(format!("{} ({})", top.value, top.count)),
            );
        cells.push(most_common);
        table.add_row(cells);
    }
    table
}

pub fn correlation_table(matrix: &CorrelationMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("")];
    header.extend(matrix.columns.iter().map(|name| header_cell(name)));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=matrix.columns.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        let mut cells = vec![header_cell(name)];
        cells.extend(row.iter().map(|&value| correlation_cell(value)));
        table.add_row(cells);
    }
    table
}

/// One-line description of an outlier run.
pub fn outlier_summary(report: &OutlierReport) -> String {
    match report {
        OutlierReport::Detected {
            column,
            method,
            values_checked,
            lower_bound,
            upper_bound,
            outliers,
        } => format!(
            "{column}: {} of {values_checked} values outside [{}, {}] ({:.1}%) using {method}",
            outliers.len(),
            format_number(*lower_bound),
            format_number(*upper_bound),
            report.percentage()
        ),
        OutlierReport::InsufficientData {
            column,
            required,
            actual,
        } => format!("{column}: need at least {required} numeric values, found {actual}"),
    }
}

pub fn outlier_table(report: &OutlierReport) -> Table {
    let mut table = Table::new();
    table.set_header(["Row", "Value", "Score"].map(header_cell));
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for outlier in report.outliers() {
        table.add_row(vec![
            Cell::new(outlier.row),
            Cell::new(format_number(outlier.value)).fg(Color::Red),
            Cell::new(format_number(outlier.score)),
        ]);
    }
    table
}

pub fn distribution_summary(distribution: &Distribution) -> String {
    format!(
        "{}: {} of {} values present, {} unique",
        distribution.column, distribution.non_empty, distribution.total_values, distribution.unique
    )
}

pub fn distribution_table(distribution: &Distribution) -> Table {
    let mut table = Table::new();
    table.set_header(["Value", "Count", "Percent"].map(header_cell));
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in &distribution.top_values {
        table.add_row(vec![
            Cell::new(&entry.value),
            Cell::new(entry.count),
            Cell::new(format!("{:.1}", entry.percentage)),
        ]);
    }
    table
}

pub fn quality_table(report: &QualityReport) -> Table {
    let mut table = Table::new();
    table.set_header(["Metric", "Value"].map(header_cell));
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let counts = [
        ("Rows", report.total_rows),
        ("Columns", report.total_columns),
        ("Cells", report.total_cells),
        ("Empty cells", report.empty_cells),
        ("Duplicate rows", report.duplicate_rows),
        ("Inconsistent rows", report.inconsistent_rows),
    ];
    for (label, count) in counts {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("Missing %"),
        Cell::new(format!("{:.1}", report.missing_percentage)),
    ]);
    for (label, score) in [
        ("Completeness", report.completeness),
        ("Consistency", report.consistency),
        ("Uniqueness", report.uniqueness),
    ] {
        table.add_row(vec![Cell::new(label), score_cell(score)]);
    }
    table.add_row(vec![
        Cell::new("Overall").add_attribute(Attribute::Bold),
        score_cell(report.overall).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Follow `--color` instead of comfy-table's own tty check.
pub fn apply_color_choice(table: &mut Table, choice: ColorChoice) {
    match choice {
        ColorChoice::Always => {
            table.enforce_styling();
        }
        ColorChoice::Never => {
            table.force_no_tty();
        }
        ColorChoice::Auto => {}
    }
}

/// Up to four decimals, trailing zeros removed.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

pub(crate) fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub(crate) fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub(crate) fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn correlation_cell(value: Correlation) -> Cell {
    match value {
        Correlation::Value(r) => {
            let cell = Cell::new(format!("{r:.3}"));
            if r >= STRONG_CORRELATION {
                cell.fg(Color::Green).add_attribute(Attribute::Bold)
            } else if r <= -STRONG_CORRELATION {
                cell.fg(Color::Red).add_attribute(Attribute::Bold)
            } else {
                cell
            }
        }
        Correlation::NotApplicable => dim_cell("n/a"),
    }
}

fn score_cell(score: f64) -> Cell {
    let color = if score >= 0.9 {
        Color::Green
    } else if score >= 0.7 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{score:.2}")).fg(color)
}
