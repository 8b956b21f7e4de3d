use thiserror::Error;

use tasklabels_model::ModelError;

use crate::gate::Unavailable;

#[derive(Debug, Error)]
pub enum LabelsError {
    #[error("custom labels requires async context frame support, which is unavailable: {0}")]
    UnsupportedRuntime(Unavailable),

    #[error("label merge failed: {0}")]
    Merge(#[from] ModelError),

    #[error("a process-wide label context is already installed")]
    AlreadyInstalled,

    #[error("invalid labels config: {0}")]
    InvalidConfig(String),
}

pub type LabelsResult<T> = Result<T, LabelsError>;
