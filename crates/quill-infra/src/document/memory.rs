//! In-memory document store - used for tests and as fallback when no
//! external store is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use quill_core::error::StoreError;
use quill_core::ports::DocumentStore;

/// In-memory store over a HashMap with an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryDocumentStore {
    store: RwLock<HashMap<String, Value>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let store = self.store.read().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        store.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }

    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>, StoreError> {
        let store = self.store.read().await;
        Ok(keys.iter().map(|key| store.get(key).cloned()).collect())
    }
}
