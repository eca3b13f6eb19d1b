//! Storage trait abstraction.

use async_trait::async_trait;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key contains characters the backend cannot store
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Backend refuses writes (disabled, quota exceeded)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// String key-value store holding serialized documents.
///
/// This is the only capability the progress store needs from its
/// environment, so backends can be swapped for tests.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value under `key`, or `None` if nothing is stored.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn remove(&mut self, key: &str) -> Result<()>;
}

/// Reject keys that could escape a backend's namespace.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key() {
        assert!(check_key("nine_experiments_progress").is_ok());
        assert!(check_key("profile-2").is_ok());
        assert!(matches!(check_key(""), Err(StorageError::InvalidKey(_))));
        assert!(matches!(check_key("../etc"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(check_key("a/b"), Err(StorageError::InvalidKey(_))));
    }
}
