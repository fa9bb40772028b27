//! Validation findings and their text rendering.

use serde::Serialize;

use csvise_model::ValidationFinding;

/// Findings produced by one validation run, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub expected_len: usize,
    findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn new(expected_len: usize) -> Self {
        Self {
            expected_len,
            findings: Vec::new(),
        }
    }

    pub fn add(&mut self, finding: ValidationFinding) {
        self.findings.push(finding);
    }

    pub fn findings(&self) -> &[ValidationFinding] {
        &self.findings
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of rows whose field count differs from the header.
    pub fn length_mismatches(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.is_length_mismatch())
            .count()
    }

    pub fn type_mismatches(&self) -> usize {
        self.findings.iter().filter(|f| f.is_type_mismatch()).count()
    }

    /// True when `row` has a type mismatch in the 1-based `column`.
    pub fn is_mismatch(&self, row: usize, column: usize) -> bool {
        self.findings.iter().any(|f| {
            matches!(f, ValidationFinding::TypeMismatch { row: r, column: c, .. } if *r == row && *c == column)
        })
    }

    /// Plain-text report. Sections without findings are omitted; the totals
    /// are always present. No trailing newline.
    pub fn render(&self) -> String {
        let mut sections: Vec<String> = Vec::new();

        let lengths: Vec<String> = self
            .findings
            .iter()
            .filter(|f| f.is_length_mismatch())
            .map(ToString::to_string)
            .collect();
        if !lengths.is_empty() {
            sections.push(format!("ROWS WITH INCORRECT LENGTH:\n{}", lengths.join("\n")));
        }

        let types: Vec<String> = self
            .findings
            .iter()
            .filter(|f| f.is_type_mismatch())
            .map(ToString::to_string)
            .collect();
        if !types.is_empty() {
            sections.push(format!(
                "ROWS WITH POTENTIAL TYPE MISMATCHES:\n{}",
                types.join("\n")
            ));
        }

        sections.push(format!(
            "Total number of rows with incorrect length: {}\nTotal number of type mismatches: {}",
            self.length_mismatches(),
            self.type_mismatches()
        ));
        sections.join("\n\n")
    }
}
