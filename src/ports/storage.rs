use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read storage slot `{key}`: {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write storage slot `{key}`: {reason}")]
    Write { key: String, reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Named string slots that outlive the process.
///
/// Each `set_item` replaces the whole value held under `key`.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
}
