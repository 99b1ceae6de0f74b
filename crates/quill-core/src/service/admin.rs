//! Admin Gate - the single shared secret guarding mutating admin operations.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::DomainError;
use crate::keys;
use crate::ports::DocumentStore;

/// Built-in secret, seeded into the store on first use.
pub const DEFAULT_ADMIN_PASSWORD: &str = "academy2026";

pub struct AdminGate {
    docs: Arc<dyn DocumentStore>,
    default_password: String,
    // Serializes seed/change cycles.
    lock: Mutex<()>,
}

impl AdminGate {
    pub fn new(docs: Arc<dyn DocumentStore>) -> Self {
        Self::with_default(docs, DEFAULT_ADMIN_PASSWORD)
    }

    pub fn with_default(docs: Arc<dyn DocumentStore>, default_password: impl Into<String>) -> Self {
        Self {
            docs,
            default_password: default_password.into(),
            lock: Mutex::new(()),
        }
    }

    /// Compare `password` against the stored secret, seeding the default
    /// first if no secret has ever been stored.
    pub async fn verify(&self, password: &str) -> Result<bool, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(password == self.current().await?)
    }

    /// Replace the stored secret. Fails `Unauthorized` when `current` does
    /// not match, leaving the stored secret unchanged.
    pub async fn change_password(&self, current: &str, next: &str) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        if current != self.current().await? {
            return Err(DomainError::Unauthorized);
        }
        self.docs
            .set(keys::ADMIN_PASSWORD, Value::String(next.to_string()))
            .await?;
        Ok(())
    }

    /// Current secret, initialized-if-absent to the built-in default.
    async fn current(&self) -> Result<String, DomainError> {
        if let Some(value) = self.docs.get(keys::ADMIN_PASSWORD).await? {
            if let Some(stored) = value.as_str() {
                return Ok(stored.to_string());
            }
            tracing::warn!("Stored admin secret is not a string; reseeding the default");
        }
        self.docs
            .set(
                keys::ADMIN_PASSWORD,
                Value::String(self.default_password.clone()),
            )
            .await?;
        Ok(self.default_password.clone())
    }
}
