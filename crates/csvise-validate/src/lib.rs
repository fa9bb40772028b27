//! Row validation against an inferred schema.
//!
//! Validation is a pure read of a [`Table`](csvise_model::Table): it never
//! modifies rows and reports problems as findings rather than errors.

mod checks;
mod report;

pub use checks::{ValidationOptions, conforms, validate};
pub use report::ValidationReport;
