//! Error types for delimited text ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing delimited text.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Detection Errors ===
    /// No candidate delimiter occurs in the sample row.
    ///
    /// Recoverable: the reader falls back to a single space.
    #[error("no delimiter candidate {candidates:?} found in sample row {sample:?}")]
    NoDelimiterFound {
        sample: String,
        candidates: Vec<String>,
    },

    /// Input has no non-blank lines.
    #[error("input is empty: {origin}")]
    EmptyInput { origin: String },

    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the output file. The destination is left untouched.
    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode rows as delimited text.
    #[error("failed to encode delimited output: {message}")]
    Encode { message: String },
}

impl IngestError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteOutput {
            path: path.into(),
            source,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/file.csv");
    }

    #[test]
    fn test_not_found_maps_to_file_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            IngestError::read("x.csv", io),
            IngestError::FileNotFound { .. }
        ));
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            IngestError::read("x.csv", io),
            IngestError::FileRead { .. }
        ));
    }
}
