use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    error::{RestyleError, Result},
    store::traits::KeyValueStore,
};

/// In-memory key-value store, used when no persistence path is configured
/// and by tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| RestyleError::StorageError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RestyleError::StorageError(e.to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RestyleError::StorageError(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
