//! In-memory store for tests and demos.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{Store, StoreError};

/// A [`Store`] backed by a shared in-process map.
///
/// Clones share the same map, so a directory and its actors (and a
/// "restarted" backend built over the same store in tests) all see one
/// consistent keyspace. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored. Test helper.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.inner.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.inner.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.inner.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("user_absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get_roundtrips() {
        let store = MemoryStore::new();
        store.put("user_1", b"hello".to_vec()).await.unwrap();
        assert_eq!(store.get("user_1").await.unwrap(), Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn test_put_replaces_previous_value() {
        let store = MemoryStore::new();
        store.put("k", b"one".to_vec()).await.unwrap();
        store.put("k", b"two".to_vec()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.put("k", b"v".to_vec()).await.unwrap();
        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_the_same_map() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store.put("k", b"v".to_vec()).await.unwrap();
        assert_eq!(clone.get("k").await.unwrap(), Some(b"v".to_vec()));
    }
}
