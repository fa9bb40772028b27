//! Delimited text ingestion for csvise.
//!
//! Reading a file runs delimiter detection on the first non-blank line,
//! splits and trims every line, then infers one expected type per column by
//! majority vote. The [`writer`] module encodes tables back to delimited text.

pub mod delimiter;
pub mod error;
pub mod normalize;
pub mod reader;
pub mod writer;

pub use csvise_model::{ColumnVotes, infer_schema, majority_type};
pub use delimiter::{
    DEFAULT_CANDIDATES, DelimiterConfig, FALLBACK_DELIMITER, detect_delimiter,
    is_whitespace_delimiter, separates_by_runs, split_line,
};
pub use error::{IngestError, Result};
pub use normalize::{normalize_field, strip_bom};
pub use reader::{parse_str, read_table};
pub use writer::{render_delimited, write_atomic, write_table};
