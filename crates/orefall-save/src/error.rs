//! Persistence errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save document could not be encoded or decoded: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save store unavailable: {0}")]
    Unavailable(&'static str),
}

pub type SaveResult<T> = Result<T, SaveError>;
