use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Document store port - a flat key to JSON-value store.
///
/// No transactions and no cross-key atomicity are assumed; callers that need
/// read-modify-write consistency must serialize access themselves.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous document.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove the document under `key`. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Fetch several documents at once, positionally: the result has one
    /// entry per requested key, `None` where no document exists.
    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>, StoreError>;
}
