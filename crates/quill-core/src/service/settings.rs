//! Site-wide QR image - a singleton media asset independent of any post.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::DomainError;
use crate::keys;
use crate::ports::{BlobStore, DocumentStore};
use crate::service::SIGNED_URL_TTL;
use crate::service::media::parse_data_uri;

pub struct QrSettings {
    docs: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    // Serializes replace/delete cycles on the singleton asset.
    lock: Mutex<()>,
}

impl QrSettings {
    pub fn new(docs: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            docs,
            blobs,
            lock: Mutex::new(()),
        }
    }

    /// Signed URL of the current QR image; `None` when unset or when signing
    /// fails (logged, not propagated).
    pub async fn get(&self) -> Result<Option<String>, DomainError> {
        let Some(path) = self.stored_path().await? else {
            return Ok(None);
        };
        Ok(self.sign(&path).await)
    }

    /// Replace the QR image: remove the old asset, upload the new one to a
    /// timestamp-suffixed path, persist the path, and mint a URL.
    pub async fn set(&self, image_data: &str) -> Result<Option<String>, DomainError> {
        let image = parse_data_uri(image_data)?;

        let _guard = self.lock.lock().await;
        if let Some(old) = self.stored_path().await? {
            self.blobs.delete(&old).await?;
        }

        let path = format!("qr/qr-image-{}.png", Utc::now().timestamp_millis());
        self.blobs
            .upload(&path, image.bytes, &image.content_type)
            .await?;
        self.docs
            .set(keys::QR_PATH, Value::String(path.clone()))
            .await?;

        Ok(self.sign(&path).await)
    }

    /// Remove the QR image and its asset. Idempotent.
    pub async fn delete(&self) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        if let Some(path) = self.stored_path().await? {
            self.blobs.delete(&path).await?;
        }
        self.docs.delete(keys::QR_PATH).await?;
        Ok(())
    }

    async fn stored_path(&self) -> Result<Option<String>, DomainError> {
        Ok(self
            .docs
            .get(keys::QR_PATH)
            .await?
            .and_then(|value| value.as_str().map(str::to_string)))
    }

    async fn sign(&self, path: &str) -> Option<String> {
        match self.blobs.signed_url(path, SIGNED_URL_TTL).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to sign QR image URL");
                None
            }
        }
    }
}
