//! Date normalization.
//!
//! Recognized inputs are `MM/DD/YYYY`, `MM-DD-YYYY`, `YYYY-MM-DD` and
//! `MM/DD/YY`, with one- or two-digit month and day. When the target is
//! [`DateFormat::Eu`], slash-separated values are read day first so that
//! already converted values stay put on a second pass.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::trace;

use csvise_model::Table;

use super::{StepOutput, resolve_columns};
use crate::error::{CleanError, Result};

/// Output layout for normalized dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    Iso,
    /// `MM/DD/YYYY`
    Us,
    /// `DD/MM/YYYY`
    Eu,
}

impl DateFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iso => "iso",
            Self::Us => "us",
            Self::Eu => "eu",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::Iso => "%Y-%m-%d",
            Self::Us => "%m/%d/%Y",
            Self::Eu => "%d/%m/%Y",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(Self::Iso),
            "us" => Ok(Self::Us),
            "eu" => Ok(Self::Eu),
            other => Err(format!("unknown date format '{other}' (expected iso, us or eu)")),
        }
    }
}

/// Rewrite recognized dates in `columns` to `format`. Other values are kept.
///
/// # Errors
///
/// [`CleanError::ColumnNotFound`] when none of `columns` exists.
pub fn normalize_dates(table: &Table, columns: &[String], format: DateFormat) -> Result<StepOutput> {
    let indices = resolve_columns(table, Some(columns));
    if indices.is_empty() {
        return Err(CleanError::ColumnNotFound {
            name: columns.join(", "),
        });
    }
    let out = StepOutput::rewrite_cells(table, &indices, |value| {
        let date = parse_date(value, format == DateFormat::Eu)?;
        let rendered = date.format(format.pattern()).to_string();
        trace!(from = value, to = %rendered, "date normalized");
        Some(rendered)
    });
    let detail = format!(
        "Modified {} date cells to format {format} in columns: {}",
        out.cells_modified,
        columns.join(", ")
    );
    Ok(out.with_detail(detail))
}

fn parse_date(value: &str, day_first: bool) -> Option<NaiveDate> {
    let (separator, [first, second, third]) = split_date(value)?;
    let (year, month, day) = match (separator, first.len(), third.len()) {
        ('-', 4, _) => (number(first)?, second, third),
        ('-', _, 4) => (number(third)?, first, second),
        ('/', _, 2 | 4) => {
            let year = number(third)?;
            let year = if third.len() == 2 {
                expand_two_digit_year(year)
            } else {
                year
            };
            if day_first {
                (year, second, first)
            } else {
                (year, first, second)
            }
        }
        _ => return None,
    };
    if month.len() > 2 || day.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn split_date(value: &str) -> Option<(char, [&str; 3])> {
    let separator = if value.contains('/') { '/' } else { '-' };
    let mut parts = value.split(separator);
    let out = [parts.next()?, parts.next()?, parts.next()?];
    let digits_only = out
        .iter()
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    (parts.next().is_none() && digits_only).then_some((separator, out))
}

fn number(text: &str) -> Option<i32> {
    text.parse().ok()
}

/// Two-digit years 00-68 map to 2000-2068, 69-99 to 1969-1999.
fn expand_two_digit_year(year: i32) -> i32 {
    if year < 69 { 2000 + year } else { 1900 + year }
}
