//! Data model shared by the csvise crates.

pub mod error;
pub mod finding;
pub mod inference;
pub mod options;
pub mod table;
pub mod types;

pub use error::{ModelError, Result};
pub use finding::ValidationFinding;
pub use inference::{ColumnVotes, infer_schema, majority_type};
pub use options::CaseStyle;
pub use table::{Column, Field, Row, Schema, Table};
pub use types::{TypeTag, classify, parse_numeric};
