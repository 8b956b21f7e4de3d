use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid runtime version: {0:?}")]
    InvalidVersion(String),

    #[error("label overrides must come in key/value pairs, got {0} values")]
    OddOverrides(usize),

    #[error("label key at position {index} must be a string, got {kind}")]
    NonStringKey { index: usize, kind: &'static str },
}

pub type ModelResult<T> = Result<T, ModelError>;
