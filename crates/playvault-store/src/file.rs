//! File-per-key store for simple durable deployments.

use std::path::PathBuf;

use tokio::fs;

use crate::{Store, StoreError};

/// A [`Store`] that keeps one file per key under a root directory.
///
/// Writes go to a `<key>.tmp` sibling first and are renamed into place,
/// so readers never observe a torn value. Per-key write ordering is the
/// actors' job (one exclusive writer per key), so no locking is needed
/// here.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        tracing::debug!(root = %root.display(), "file store opened");
        Ok(Self { root })
    }

    /// Maps a key to its path, rejecting anything that could escape the
    /// root. Addresses only ever contain `[a-z0-9_]`, so this fires
    /// only on callers that bypassed the addressing layer.
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let ok = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !ok {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl Store for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A unique scratch directory per test, removed on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(tag: &str) -> Self {
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos();
            Self(std::env::temp_dir().join(format!(
                "playvault-filestore-{tag}-{}-{nanos}",
                std::process::id()
            )))
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[tokio::test]
    async fn test_put_then_get_roundtrips() {
        let scratch = Scratch::new("roundtrip");
        let store = FileStore::open(&scratch.0).await.unwrap();
        store.put("user_abc", b"payload".to_vec()).await.unwrap();
        assert_eq!(
            store.get("user_abc").await.unwrap(),
            Some(b"payload".to_vec())
        );
    }

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let scratch = Scratch::new("missing");
        let store = FileStore::open(&scratch.0).await.unwrap();
        assert_eq!(store.get("user_absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let scratch = Scratch::new("delete");
        let store = FileStore::open(&scratch.0).await.unwrap();
        store.delete("sess_gone").await.unwrap();
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let scratch = Scratch::new("reopen");
        {
            let store = FileStore::open(&scratch.0).await.unwrap();
            store.put("user_1", b"durable".to_vec()).await.unwrap();
        }
        let reopened = FileStore::open(&scratch.0).await.unwrap();
        assert_eq!(
            reopened.get("user_1").await.unwrap(),
            Some(b"durable".to_vec())
        );
    }

    #[tokio::test]
    async fn test_path_traversal_keys_are_rejected() {
        let scratch = Scratch::new("traversal");
        let store = FileStore::open(&scratch.0).await.unwrap();
        let result = store.get("../etc/passwd").await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }
}
