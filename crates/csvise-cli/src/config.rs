//! JSON configuration file.
//!
//! Every key is optional; missing keys keep their defaults. The loaded
//! config is turned into explicit per-component options before use.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use csvise_ingest::DelimiterConfig;
use csvise_model::CaseStyle;
use csvise_validate::ValidationOptions;

use crate::render::DisplayOptions;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "csvise.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsviseConfig {
    /// Delimiter candidates tried before the built-in ones.
    pub additional_delimiters: Vec<String>,
    /// First data row displayed, 1-based.
    pub start_index: usize,
    /// Display limit; `None` shows every row.
    pub num_rows_to_print: Option<usize>,
    pub display_column_lines: bool,
    pub display_row_lines: bool,
    pub check_type_mismatches: bool,
    pub string_case: StringCase,
}

impl Default for CsviseConfig {
    fn default() -> Self {
        Self {
            additional_delimiters: Vec::new(),
            start_index: 1,
            num_rows_to_print: None,
            display_column_lines: false,
            display_row_lines: false,
            check_type_mismatches: true,
            string_case: StringCase::Default,
        }
    }
}

/// Display case transform; `default` leaves text as read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringCase {
    #[default]
    Default,
    Upper,
    Lower,
    Title,
    Sentence,
}

impl StringCase {
    pub fn style(self) -> Option<CaseStyle> {
        match self {
            Self::Default => None,
            Self::Upper => Some(CaseStyle::Upper),
            Self::Lower => Some(CaseStyle::Lower),
            Self::Title => Some(CaseStyle::Title),
            Self::Sentence => Some(CaseStyle::Sentence),
        }
    }
}

impl CsviseConfig {
    /// Load `explicit`, or the default file from the working directory.
    ///
    /// # Errors
    ///
    /// An explicit path that does not exist, an unreadable file, or invalid
    /// JSON. A missing default file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                Self::from_file(path)
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse one config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Delimiter candidates plus the command-line override.
    pub fn delimiter_config(&self, override_delimiter: Option<String>) -> DelimiterConfig {
        DelimiterConfig::new()
            .with_additional(self.additional_delimiters.clone())
            .with_override(override_delimiter)
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions::default().with_type_checks(self.check_type_mismatches)
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            start_index: self.start_index.max(1),
            row_limit: self.num_rows_to_print,
            column_lines: self.display_column_lines,
            row_lines: self.display_row_lines,
            case: self.string_case.style(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let config = CsviseConfig::from_json(r#"{"start_index": 3}"#).unwrap();
        assert_eq!(config.start_index, 3);
        assert!(config.check_type_mismatches);
        assert_eq!(config.string_case, StringCase::Default);
    }

    #[test]
    fn string_case_maps_to_style() {
        let config = CsviseConfig::from_json(r#"{"string_case": "title"}"#).unwrap();
        assert_eq!(config.display_options().case, Some(CaseStyle::Title));
        assert_eq!(StringCase::Default.style(), None);
    }

    #[test]
    fn zero_start_index_is_clamped() {
        let config = CsviseConfig::from_json(r#"{"start_index": 0}"#).unwrap();
        assert_eq!(config.display_options().start_index, 1);
    }

    #[test]
    fn additional_delimiters_come_first() {
        let config = CsviseConfig::from_json(r#"{"additional_delimiters": ["~"]}"#).unwrap();
        let delimiters = config.delimiter_config(None);
        assert_eq!(delimiters.candidates()[0], "~");
        assert_eq!(delimiters.override_delimiter, None);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(CsviseConfig::from_json("{start_index: 1").is_err());
        assert!(CsviseConfig::from_json(r#"{"string_case": "camel"}"#).is_err());
    }
}
