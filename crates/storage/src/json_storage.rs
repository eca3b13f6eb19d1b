//! JSON file storage implementation.
//!
//! Stores each key as `<root>/<key>.json` and keeps a small per-key meta
//! marker (version + updated_at) under `<root>/meta/`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::trait_::check_key;
use super::{Result, Storage};

/// File-based JSON storage backend.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory and its
    /// `meta/` subdirectory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join("meta")).await?;

        Ok(Self { root })
    }

    /// Directory holding the stored documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{}.json.tmp", key))
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.root.join("meta").join(format!("{}.meta.json", key))
    }

    /// Read and increment the per-key version, return the new version.
    async fn bump_version(&self, key: &str) -> Result<u64> {
        let path = self.meta_path(key);
        let mut version = 0u64;
        if let Ok(s) = fs::read_to_string(&path).await {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&s) {
                if let Some(v) = json.get("version").and_then(|v| v.as_u64()) {
                    version = v;
                }
            }
        }
        version += 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }

    /// Version recorded in the meta marker for `key` (0 if never written).
    pub async fn version(&self, key: &str) -> Result<u64> {
        check_key(key)?;
        match fs::read_to_string(self.meta_path(key)).await {
            Ok(s) => {
                let json: serde_json::Value = serde_json::from_str(&s)?;
                Ok(json.get("version").and_then(|v| v.as_u64()).unwrap_or(0))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        match fs::read_to_string(self.value_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;

        // Flush to disk before the rename so the swap never exposes a
        // partial document, even after a crash
        let tmp = self.temp_path(key);
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, self.value_path(key)).await?;

        // The document is saved at this point; the marker is advisory
        match self.bump_version(key).await {
            Ok(version) => debug!(key, version, "wrote document"),
            Err(e) => warn!(key, error = %e, "wrote document but failed to update meta marker"),
        }
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        for path in [self.value_path(key), self.meta_path(key)] {
            fs::remove_file(&path).await.or_else(|e| {
                if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;

    #[tokio::test]
    async fn test_read_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        assert!(storage.read("progress").await.unwrap().is_none());
        assert_eq!(storage.version("progress").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        storage.write("progress", r#"{"a":1}"#).await.unwrap();
        assert_eq!(
            storage.read("progress").await.unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
        assert!(dir.path().join("progress.json").exists());
        assert!(!dir.path().join(".progress.json.tmp").exists());

        storage.write("progress", r#"{"a":2}"#).await.unwrap();
        assert_eq!(
            storage.read("progress").await.unwrap().as_deref(),
            Some(r#"{"a":2}"#)
        );
        assert_eq!(storage.version("progress").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_reopen_sees_previous_writes() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = JsonStorage::new(dir.path()).await.unwrap();
            storage.write("progress", "kept").await.unwrap();
        }

        let storage = JsonStorage::new(dir.path()).await.unwrap();
        assert_eq!(storage.read("progress").await.unwrap().as_deref(), Some("kept"));
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        storage.remove("progress").await.unwrap();

        storage.write("progress", "x").await.unwrap();
        storage.remove("progress").await.unwrap();
        assert!(storage.read("progress").await.unwrap().is_none());
        assert_eq!(storage.version("progress").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_write_survives_meta_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        // meta/ replaced by a plain file: marker updates can no longer land
        std::fs::remove_dir(dir.path().join("meta")).unwrap();
        std::fs::write(dir.path().join("meta"), "").unwrap();

        storage.write("progress", "saved").await.unwrap();

        assert_eq!(storage.read("progress").await.unwrap().as_deref(), Some("saved"));
        assert!(!dir.path().join(".progress.json.tmp").exists());
        assert!(storage.version("progress").await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let err = storage.write("../outside", "x").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
