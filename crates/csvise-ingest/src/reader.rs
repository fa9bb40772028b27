//! Parse delimited text into a [`Table`].

use std::path::Path;

use tracing::{debug, info, warn};

use csvise_model::{Field, Row, Table, infer_schema};

use crate::delimiter::{
    DelimiterConfig, FALLBACK_DELIMITER, detect_delimiter, separates_by_runs, split_line,
};
use crate::error::{IngestError, Result};
use crate::normalize::{normalize_field, strip_bom};

/// Read and parse a delimited text file.
///
/// The whole file is loaded into memory.
pub fn read_table(path: &Path, config: &DelimiterConfig) -> Result<Table> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::read(path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "read input file");
    parse_lines(&text, &path.display().to_string(), config)
}

/// Parse delimited text held in memory.
pub fn parse_str(text: &str, config: &DelimiterConfig) -> Result<Table> {
    parse_lines(text, "<input>", config)
}

/// Data rows are numbered by their line offset from the header, so blank
/// lines are skipped but still counted.
fn parse_lines(text: &str, origin: &str, config: &DelimiterConfig) -> Result<Table> {
    let lines: Vec<(usize, &str)> = strip_bom(text)
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();
    let Some((&(header_line, sample), body)) = lines.split_first() else {
        return Err(IngestError::EmptyInput {
            origin: origin.to_string(),
        });
    };

    let (delimiter, collapse_runs) = match detect_delimiter(sample, config) {
        Ok(delimiter) => {
            let runs = separates_by_runs(sample, &delimiter);
            (delimiter, runs)
        }
        Err(error) => {
            warn!(%error, fallback = ?FALLBACK_DELIMITER, "falling back to default delimiter");
            (FALLBACK_DELIMITER.to_string(), true)
        }
    };
    debug!(delimiter = ?delimiter, collapse_runs, "splitting lines");

    let header = unique_header(split_line(sample, &delimiter, collapse_runs));
    let rows: Vec<Row> = body
        .iter()
        .map(|&(line, text)| {
            let fields = split_line(text, &delimiter, collapse_runs)
                .into_iter()
                .map(|raw| Field::new(normalize_field(raw)))
                .collect();
            Row::new(line - header_line, fields)
        })
        .collect();

    let schema = infer_schema(&rows, header.len());
    info!(
        origin,
        delimiter = ?delimiter,
        columns = header.len(),
        rows = rows.len(),
        "parsed table"
    );
    Ok(Table::new(header, &schema, rows, delimiter))
}

/// Normalize header names and make them unique.
///
/// Blank names become `column_<n>`; repeated names get a `_<k>` suffix.
fn unique_header(raw: Vec<&str>) -> Vec<String> {
    let mut header: Vec<String> = Vec::with_capacity(raw.len());
    for (idx, name) in raw.into_iter().enumerate() {
        let base = match normalize_field(name) {
            name if name.is_empty() => format!("column_{}", idx + 1),
            name => name,
        };
        let mut candidate = base.clone();
        let mut suffix = 2;
        while header.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        if candidate != base {
            warn!(column = idx + 1, name = %base, renamed = %candidate, "duplicate header name");
        }
        header.push(candidate);
    }
    header
}
