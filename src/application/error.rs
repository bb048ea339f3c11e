use crate::domain::DomainError;
use crate::ports::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Stored snapshot under `{key}` is unreadable: {reason}")]
    CorruptSnapshot { key: String, reason: String },

    #[error("Failed to encode snapshot: {0}")]
    Serialization(String),
}

pub type AppResult<T> = Result<T, AppError>;
