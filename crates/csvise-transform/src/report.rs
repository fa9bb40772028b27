//! The cleaning log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CleanError;
use crate::pipeline::CleaningStep;
use crate::steps::StepOutput;

/// Whether a step changed the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied,
    Failed { reason: String },
}

/// One line of the cleaning log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningLogEntry {
    pub operation: String,
    /// The step in command-line syntax.
    pub step: String,
    pub detail: String,
    pub outcome: StepOutcome,
    /// 1-based input positions of rows that were modified or removed.
    pub affected_rows: Vec<usize>,
    pub cells_modified: usize,
    pub rows_removed: usize,
    pub timestamp: DateTime<Utc>,
}

impl CleaningLogEntry {
    pub(crate) fn applied(step: &CleaningStep, output: &StepOutput) -> Self {
        Self {
            operation: step.operation().to_string(),
            step: step.to_string(),
            detail: output.detail.clone(),
            outcome: StepOutcome::Applied,
            affected_rows: output.affected_rows.clone(),
            cells_modified: output.cells_modified,
            rows_removed: output.rows_removed,
            timestamp: Utc::now(),
        }
    }

    pub(crate) fn failed(step: &CleaningStep, error: &CleanError) -> Self {
        Self {
            operation: step.operation().to_string(),
            step: step.to_string(),
            detail: String::new(),
            outcome: StepOutcome::Failed {
                reason: error.to_string(),
            },
            affected_rows: Vec::new(),
            cells_modified: 0,
            rows_removed: 0,
            timestamp: Utc::now(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, StepOutcome::Failed { .. })
    }
}

/// Log of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub original_row_count: usize,
    pub final_row_count: usize,
    pub entries: Vec<CleaningLogEntry>,
}

impl CleaningReport {
    pub fn new(original_row_count: usize) -> Self {
        Self {
            original_row_count,
            final_row_count: original_row_count,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: CleaningLogEntry) {
        self.entries.push(entry);
    }

    pub fn total_operations(&self) -> usize {
        self.entries.len()
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(CleaningLogEntry::is_failed)
    }

    pub fn cells_modified(&self) -> usize {
        self.entries.iter().map(|e| e.cells_modified).sum()
    }

    pub fn rows_removed(&self) -> usize {
        self.entries.iter().map(|e| e.rows_removed).sum()
    }

    /// Plain-text log without timestamps.
    pub fn render(&self) -> String {
        let mut lines = vec![format!(
            "Cleaning: {} operations, {} -> {} rows",
            self.total_operations(),
            self.original_row_count,
            self.final_row_count
        )];
        for entry in &self.entries {
            match &entry.outcome {
                StepOutcome::Applied => lines.push(format!(
                    "[ok] {}: {}",
                    entry.operation, entry.detail
                )),
                StepOutcome::Failed { reason } => {
                    lines.push(format!("[failed] {}: {reason}", entry.operation));
                }
            }
        }
        lines.join("\n")
    }
}
