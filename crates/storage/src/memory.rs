//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::trait_::check_key;
use super::{Result, Storage, StorageError};

/// In-memory storage.
///
/// Clones share the same underlying map, so several stores can be pointed
/// at one "profile" the way browser tabs share local storage.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    writable: bool,
}

impl MemoryStorage {
    /// Create an empty, writable store.
    pub fn new() -> Self {
        Self {
            entries: Arc::default(),
            writable: true,
        }
    }

    /// Create a store whose writes always fail, modelling disabled storage
    /// or an exhausted quota. Reads still succeed.
    pub fn unavailable() -> Self {
        Self {
            entries: Arc::default(),
            writable: false,
        }
    }

    /// A handle onto the same map that refuses writes.
    pub fn read_only(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            writable: false,
        }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.writable {
            Ok(())
        } else {
            Err(StorageError::Unavailable("storage is read-only".to_string()))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn write(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.ensure_writable()?;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        self.ensure_writable()?;
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_entries() {
        let mut a = MemoryStorage::new();
        let b = a.clone();

        a.write("progress", "one").await.unwrap();
        assert_eq!(b.read("progress").await.unwrap().as_deref(), Some("one"));
        assert_eq!(b.len().await, 1);
    }

    #[tokio::test]
    async fn test_unavailable_rejects_writes() {
        let mut storage = MemoryStorage::unavailable();

        let err = storage.write("progress", "x").await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(storage.read("progress").await.unwrap().is_none());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_read_only_handle() {
        let mut storage = MemoryStorage::new();
        storage.write("progress", "kept").await.unwrap();

        let mut view = storage.read_only();
        assert!(view.write("progress", "lost").await.is_err());
        assert!(view.remove("progress").await.is_err());
        assert_eq!(view.read("progress").await.unwrap().as_deref(), Some("kept"));
    }
}
