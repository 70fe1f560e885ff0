use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    error::{RestyleError, Result},
    store::traits::KeyValueStore,
};

/// Key-value store backed by one JSON object file. The whole map is read and
/// rewritten per operation; a write is never partial because the file content
/// is serialized before the file is touched.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| RestyleError::SerializationError(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(RestyleError::StorageError(e.to_string())),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(map)
            .map_err(|e| RestyleError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| RestyleError::StorageError(e.to_string()))?;
            }
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| RestyleError::StorageError(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await.unwrap_or_default();
        map.insert(key.to_string(), value);
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await.unwrap_or_default();
        map.remove(key);
        self.write_map(&map).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("prefs.json"));

        assert_eq!(store.get("k").await.unwrap(), None);

        store.put("k", "v1".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v1".to_string()));

        store.put("k", "v2".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
