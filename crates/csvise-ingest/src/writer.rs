//! Delimited output and atomic file writes.

use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use csvise_model::Table;

use crate::error::{IngestError, Result};

/// Write `bytes` to `path` atomically.
///
/// Data goes to a temporary file in the destination directory which is then
/// renamed over `path`. On failure the destination is left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp_file =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| IngestError::write(path, e))?;
    temp_file
        .write_all(bytes)
        .map_err(|e| IngestError::write(path, e))?;
    temp_file.flush().map_err(|e| IngestError::write(path, e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| IngestError::write(path, e))?;
    temp_file
        .persist(path)
        .map_err(|e| IngestError::write(path, e.error))?;
    Ok(())
}

/// Encode the header and every row, one record per line.
///
/// Values are written as-is without quoting; rows keep their own length.
pub fn render_delimited(table: &Table, delimiter: &str) -> Result<Vec<u8>> {
    match delimiter.as_bytes() {
        [byte] => render_with_csv(table, *byte),
        _ => Ok(render_joined(table, delimiter)),
    }
}

/// Write `table` to `path` using `delimiter`, or the table's own delimiter.
pub fn write_table(table: &Table, path: &Path, delimiter: Option<&str>) -> Result<()> {
    let delimiter = delimiter
        .filter(|d| !d.is_empty())
        .unwrap_or(table.delimiter());
    let bytes = render_delimited(table, delimiter)?;
    write_atomic(path, &bytes)?;
    info!(
        path = %path.display(),
        delimiter = ?delimiter,
        rows = table.row_count(),
        "wrote table"
    );
    Ok(())
}

fn render_with_csv(table: &Table, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());
    writer.write_record(table.header()).map_err(encode)?;
    for row in table.rows() {
        writer.write_record(row.values()).map_err(encode)?;
    }
    writer.into_inner().map_err(|e| IngestError::Encode {
        message: e.to_string(),
    })
}

fn render_joined(table: &Table, delimiter: &str) -> Vec<u8> {
    let mut out = table.header().join(delimiter);
    out.push('\n');
    for row in table.rows() {
        out.push_str(&row.values().collect::<Vec<_>>().join(delimiter));
        out.push('\n');
    }
    out.into_bytes()
}

fn encode(error: csv::Error) -> IngestError {
    IngestError::Encode {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delimiter::DelimiterConfig;
    use crate::reader::parse_str;

    #[test]
    fn renders_rows_with_their_own_length() {
        let table = parse_str("a,b\n1,2\n3\n", &DelimiterConfig::new()).unwrap();
        let bytes = render_delimited(&table, ";").unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a;b\n1;2\n3\n");
    }

    #[test]
    fn multi_character_delimiters_are_joined() {
        let table = parse_str("a,b\n1,2\n", &DelimiterConfig::new()).unwrap();
        let bytes = render_delimited(&table, "::").unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a::b\n1::2\n");
    }

    #[test]
    fn write_table_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale").unwrap();
        let table = parse_str("x|y\n1|2\n", &DelimiterConfig::new()).unwrap();
        write_table(&table, &path, None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x|y\n1|2\n");
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, IngestError::WriteOutput { .. }));
        assert!(!path.exists());
    }
}
