//! Ordered cleaning steps and their command-line syntax.
//!
//! Step syntax, columns comma-separated:
//!
//! | step | meaning |
//! |------|---------|
//! | `dedupe[:cols]` | remove duplicate rows |
//! | `whitespace[:cols]` | trim and collapse whitespace |
//! | `case:<upper\|lower\|title\|sentence>[:cols]` | standardize case |
//! | `fill:<mode\|mean\|median\|empty\|value=TEXT>[:cols]` | fill missing values |
//! | `drop-empty:<threshold>` | remove mostly empty rows |
//! | `dates:<iso\|us\|eu>:<cols>` | normalize dates |
//!
//! A `value=` fill text cannot contain `:`.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

use csvise_model::{CaseStyle, Table};

use crate::error::{CleanError, Result};
use crate::report::{CleaningLogEntry, CleaningReport};
use crate::steps::{
    DateFormat, FillStrategy, StepOutput, fill_missing, normalize_dates, normalize_whitespace,
    remove_duplicates, remove_empty_rows, standardize_case,
};

/// One cleaning operation. `None` column lists select every column.
#[derive(Debug, Clone, PartialEq)]
pub enum CleaningStep {
    RemoveDuplicates {
        columns: Option<Vec<String>>,
    },
    NormalizeWhitespace {
        columns: Option<Vec<String>>,
    },
    StandardizeCase {
        style: CaseStyle,
        columns: Option<Vec<String>>,
    },
    FillMissing {
        strategy: FillStrategy,
        columns: Option<Vec<String>>,
    },
    RemoveEmptyRows {
        threshold: f64,
    },
    NormalizeDates {
        columns: Vec<String>,
        format: DateFormat,
    },
}

impl CleaningStep {
    /// Name shown in the cleaning log.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::RemoveDuplicates { .. } => "Remove Duplicates",
            Self::NormalizeWhitespace { .. } => "Normalize Whitespace",
            Self::StandardizeCase { .. } => "Standardize Case",
            Self::FillMissing { .. } => "Fill Missing Values",
            Self::RemoveEmptyRows { .. } => "Remove Empty Rows",
            Self::NormalizeDates { .. } => "Normalize Dates",
        }
    }

    /// Run the step against `table` without modifying it.
    pub fn apply(&self, table: &Table) -> Result<StepOutput> {
        match self {
            Self::RemoveDuplicates { columns } => Ok(remove_duplicates(table, columns.as_deref())),
            Self::NormalizeWhitespace { columns } => {
                Ok(normalize_whitespace(table, columns.as_deref()))
            }
            Self::StandardizeCase { style, columns } => {
                Ok(standardize_case(table, *style, columns.as_deref()))
            }
            Self::FillMissing { strategy, columns } => {
                fill_missing(table, strategy, columns.as_deref())
            }
            Self::RemoveEmptyRows { threshold } => remove_empty_rows(table, *threshold),
            Self::NormalizeDates { columns, format } => normalize_dates(table, columns, *format),
        }
    }
}

impl fmt::Display for CleaningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn scope(columns: Option<&Vec<String>>) -> String {
            columns.map_or_else(String::new, |c| format!(":{}", c.join(",")))
        }
        match self {
            Self::RemoveDuplicates { columns } => write!(f, "dedupe{}", scope(columns.as_ref())),
            Self::NormalizeWhitespace { columns } => {
                write!(f, "whitespace{}", scope(columns.as_ref()))
            }
            Self::StandardizeCase { style, columns } => {
                write!(f, "case:{style}{}", scope(columns.as_ref()))
            }
            Self::FillMissing { strategy, columns } => {
                write!(f, "fill:{strategy}{}", scope(columns.as_ref()))
            }
            Self::RemoveEmptyRows { threshold } => write!(f, "drop-empty:{threshold}"),
            Self::NormalizeDates { columns, format } => {
                write!(f, "dates:{format}:{}", columns.join(","))
            }
        }
    }
}

impl FromStr for CleaningStep {
    type Err = CleanError;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = |reason: String| CleanError::InvalidStep {
            input: input.to_string(),
            reason,
        };
        let (kind, rest) = split_arg(input.trim());
        match kind.to_ascii_lowercase().as_str() {
            "dedupe" => Ok(Self::RemoveDuplicates {
                columns: rest.and_then(parse_columns),
            }),
            "whitespace" => Ok(Self::NormalizeWhitespace {
                columns: rest.and_then(parse_columns),
            }),
            "case" => {
                let (style, columns) =
                    split_arg(rest.ok_or_else(|| invalid("missing case style".into()))?);
                let style = style
                    .parse::<CaseStyle>()
                    .map_err(|e| invalid(e.to_string()))?;
                Ok(Self::StandardizeCase {
                    style,
                    columns: columns.and_then(parse_columns),
                })
            }
            "fill" => {
                let (strategy, columns) =
                    split_arg(rest.ok_or_else(|| invalid("missing fill strategy".into()))?);
                Ok(Self::FillMissing {
                    strategy: parse_fill_strategy(strategy).map_err(invalid)?,
                    columns: columns.and_then(parse_columns),
                })
            }
            "drop-empty" => {
                let text = rest.ok_or_else(|| invalid("missing threshold".into()))?;
                let threshold = text
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| invalid(format!("threshold '{text}': {e}")))?;
                Ok(Self::RemoveEmptyRows { threshold })
            }
            "dates" => {
                let (format, columns) =
                    split_arg(rest.ok_or_else(|| invalid("missing date format".into()))?);
                let format = format.parse::<DateFormat>().map_err(invalid)?;
                let columns = columns
                    .and_then(parse_columns)
                    .ok_or_else(|| invalid("date normalization needs at least one column".into()))?;
                Ok(Self::NormalizeDates { columns, format })
            }
            other => Err(invalid(format!(
                "unknown step '{other}' (expected dedupe, whitespace, case, fill, drop-empty or dates)"
            ))),
        }
    }
}

fn split_arg(text: &str) -> (&str, Option<&str>) {
    match text.split_once(':') {
        Some((head, tail)) => (head.trim(), Some(tail)),
        None => (text.trim(), None),
    }
}

fn parse_columns(text: &str) -> Option<Vec<String>> {
    let columns: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    (!columns.is_empty()).then_some(columns)
}

fn parse_fill_strategy(text: &str) -> std::result::Result<FillStrategy, String> {
    if let Some(value) = text.strip_prefix("value=") {
        return Ok(FillStrategy::Value(value.to_string()));
    }
    match text.trim().to_ascii_lowercase().as_str() {
        "empty" => Ok(FillStrategy::Empty),
        "mode" => Ok(FillStrategy::Mode),
        "mean" => Ok(FillStrategy::Mean),
        "median" => Ok(FillStrategy::Median),
        other => Err(format!(
            "unknown fill strategy '{other}' (expected mode, mean, median, empty or value=TEXT)"
        )),
    }
}

/// Steps run in order against one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningPipeline {
    steps: Vec<CleaningStep>,
}

impl CleaningPipeline {
    pub fn new(steps: Vec<CleaningStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[CleaningStep] {
        &self.steps
    }

    /// Apply every step in order, replacing the table body after each success.
    ///
    /// Column types are re-inferred from the new body before the next step
    /// runs. A failing step is logged and skipped; later steps still run.
    pub fn run(&self, table: &mut Table) -> CleaningReport {
        let mut report = CleaningReport::new(table.row_count());
        for step in &self.steps {
            match step.apply(table) {
                Ok(output) => {
                    info!(
                        step = %step,
                        cells_modified = output.cells_modified,
                        rows_removed = output.rows_removed,
                        "{}", output.detail
                    );
                    report.push(CleaningLogEntry::applied(step, &output));
                    table.replace_rows(output.into_rows());
                    for (index, previous, current) in table.reinfer_schema() {
                        debug!(step = %step, column = index + 1, %previous, %current, "column type changed");
                    }
                }
                Err(error) => {
                    warn!(step = %step, %error, "cleaning step failed");
                    report.push(CleaningLogEntry::failed(step, &error));
                }
            }
        }
        report.final_row_count = table.row_count();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> CleaningStep {
        input.parse().unwrap()
    }

    #[test]
    fn parses_every_step_kind() {
        assert_eq!(parse("dedupe"), CleaningStep::RemoveDuplicates { columns: None });
        assert_eq!(
            parse("whitespace: a , b"),
            CleaningStep::NormalizeWhitespace {
                columns: Some(vec!["a".into(), "b".into()])
            }
        );
        assert_eq!(
            parse("case:title:name"),
            CleaningStep::StandardizeCase {
                style: CaseStyle::Title,
                columns: Some(vec!["name".into()])
            }
        );
        assert_eq!(
            parse("fill:value=N/A:city,zip"),
            CleaningStep::FillMissing {
                strategy: FillStrategy::Value("N/A".into()),
                columns: Some(vec!["city".into(), "zip".into()])
            }
        );
        assert_eq!(
            parse("drop-empty:0.5"),
            CleaningStep::RemoveEmptyRows { threshold: 0.5 }
        );
        assert_eq!(
            parse("dates:eu:born"),
            CleaningStep::NormalizeDates {
                columns: vec!["born".into()],
                format: DateFormat::Eu
            }
        );
    }

    #[test]
    fn display_uses_step_syntax() {
        for input in ["dedupe:a,b", "case:upper", "fill:median:x", "dates:iso:d", "drop-empty:0.25"] {
            assert_eq!(parse(input).to_string(), input);
        }
    }

    #[test]
    fn rejects_malformed_steps() {
        for input in ["shuffle", "case", "case:camel", "fill:avg", "drop-empty:lots", "dates:iso"] {
            let err = input.parse::<CleaningStep>().unwrap_err();
            assert!(matches!(err, CleanError::InvalidStep { .. }), "{input}");
        }
    }
}
