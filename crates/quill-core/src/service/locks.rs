//! Per-key write serialization.
//!
//! The document store offers no transactions, so every read-modify-write of a
//! post document or of the post index runs under an in-process mutex keyed by
//! the document key. Two concurrent comment additions to the same post queue
//! instead of overwriting each other. Cross-process writers are not covered.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

pub(crate) struct KeyLocks {
    registry: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the mutex for `key`, creating it on first use.
    ///
    /// Idle entries (no guard held, no waiter queued) are swept on each
    /// acquire, so the registry does not grow with every key ever touched.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.registry.lock().await;
            registry.retain(|_, lock| Arc::strong_count(lock) > 1);
            registry.entry(key.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
