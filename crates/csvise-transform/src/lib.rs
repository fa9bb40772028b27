//! Cleaning operations for csvise tables.
//!
//! Every step reads a [`Table`](csvise_model::Table) and produces a new row
//! body; [`CleaningPipeline`] runs steps in order and keeps a cleaning log.

pub mod error;
pub mod pipeline;
pub mod report;
pub mod steps;

pub use error::{CleanError, Result};
pub use pipeline::{CleaningPipeline, CleaningStep};
pub use report::{CleaningLogEntry, CleaningReport, StepOutcome};
pub use steps::{
    DateFormat, FillStrategy, StepOutput, fill_missing, normalize_dates, normalize_whitespace,
    remove_duplicates, remove_empty_rows, standardize_case,
};
