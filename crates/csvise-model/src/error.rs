use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown type tag '{0}' (expected bool, int, float or str)")]
    UnknownTypeTag(String),
    #[error("unknown case style '{0}' (expected upper, lower, title or sentence)")]
    UnknownCaseStyle(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
