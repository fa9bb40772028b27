//! Delimiter detection and line splitting.
//!
//! Detection scores every candidate by its occurrence count in a sample row
//! and keeps the highest. Ties go to the candidate listed first, so
//! user-configured candidates (listed before the defaults) win ties.

use tracing::debug;

use crate::error::{IngestError, Result};

/// Candidates always tried after any user-configured ones.
pub const DEFAULT_CANDIDATES: [&str; 4] = [",", "\t", ";", "|"];

/// Delimiter used when no candidate occurs in the sample row.
pub const FALLBACK_DELIMITER: &str = " ";

/// Delimiter candidates plus an optional explicit override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimiterConfig {
    /// Extra candidates, tried before [`DEFAULT_CANDIDATES`].
    pub additional: Vec<String>,
    /// Used unconditionally when set.
    pub override_delimiter: Option<String>,
}

impl DelimiterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_additional(mut self, additional: Vec<String>) -> Self {
        self.additional = additional;
        self
    }

    pub fn with_override(mut self, delimiter: Option<String>) -> Self {
        self.override_delimiter = delimiter;
        self
    }

    /// Ordered candidate list: additions first, then defaults, without
    /// duplicates or empty strings.
    pub fn candidates(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let all = self
            .additional
            .iter()
            .map(String::as_str)
            .chain(DEFAULT_CANDIDATES);
        for candidate in all {
            if candidate.is_empty() || out.iter().any(|c| c == candidate) {
                continue;
            }
            out.push(candidate.to_string());
        }
        out
    }
}

/// Pick the field separator for `sample`.
///
/// # Errors
///
/// Returns [`IngestError::NoDelimiterFound`] when no candidate occurs in the
/// sample. Callers are expected to fall back to [`FALLBACK_DELIMITER`].
pub fn detect_delimiter(sample: &str, config: &DelimiterConfig) -> Result<String> {
    if let Some(delimiter) = config
        .override_delimiter
        .as_deref()
        .filter(|d| !d.is_empty())
    {
        debug!(delimiter = ?delimiter, "using explicit delimiter");
        return Ok(delimiter.to_string());
    }

    let candidates = config.candidates();
    let mut best: Option<(&str, usize)> = None;
    for candidate in &candidates {
        let count = sample.matches(candidate.as_str()).count();
        debug!(candidate = ?candidate, count, "scored delimiter candidate");
        if count > 0 && best.is_none_or(|(_, top)| count > top) {
            best = Some((candidate.as_str(), count));
        }
    }

    match best {
        Some((delimiter, count)) => {
            debug!(delimiter = ?delimiter, count, "delimiter detected");
            Ok(delimiter.to_string())
        }
        None => Err(IngestError::NoDelimiterFound {
            sample: sample.to_string(),
            candidates,
        }),
    }
}

/// True when the delimiter consists only of whitespace.
pub fn is_whitespace_delimiter(delimiter: &str) -> bool {
    !delimiter.is_empty() && delimiter.chars().all(char::is_whitespace)
}

/// True when `delimiter` separates fields in runs rather than one at a time.
///
/// Only whitespace delimiters qualify, and only when the sample row already
/// holds the delimiter twice in a row, as column-aligned output does. A
/// single-tab layout keeps its empty fields.
pub fn separates_by_runs(sample: &str, delimiter: &str) -> bool {
    is_whitespace_delimiter(delimiter) && sample.contains(&delimiter.repeat(2))
}

/// Split one line into raw fields.
///
/// With `collapse_runs` a run of delimiters counts as one separator and
/// leading or trailing runs produce no fields. Otherwise the split is exact
/// and keeps empty fields. Quoting is not interpreted.
pub fn split_line<'a>(line: &'a str, delimiter: &str, collapse_runs: bool) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![line];
    }
    if collapse_runs {
        line.split(delimiter).filter(|part| !part.is_empty()).collect()
    } else {
        line.split(delimiter).collect()
    }
}
