//! In-memory blob store - used for tests and as fallback when no bucket is
//! configured.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::error::BlobError;
use quill_core::ports::BlobStore;

struct StoredBlob {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory object store. Signed URLs are fake `memory://` URLs carrying a
/// per-mint token, so tests can observe that each read mints a fresh one.
///
/// Note: Data is lost on process restart.
pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<String, StoredBlob>>,
    mint_counter: AtomicU64,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            mint_counter: AtomicU64::new(0),
        }
    }

    /// Number of stored objects. Test inspection helper.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether an object exists at `path`. Test inspection helper.
    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }

    /// Content type of the object at `path`. Test inspection helper.
    pub async fn content_type(&self, path: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|blob| blob.content_type.clone())
    }

    /// Raw bytes of the object at `path`. Test inspection helper.
    pub async fn bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|blob| blob.bytes.clone())
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BlobError> {
        let mut objects = self.objects.write().await;
        objects.insert(
            path.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), BlobError> {
        let mut objects = self.objects.write().await;
        objects.remove(path);
        Ok(())
    }

    async fn signed_url(&self, path: &str, expires_in: Duration) -> Result<String, BlobError> {
        let objects = self.objects.read().await;
        if !objects.contains_key(path) {
            return Err(BlobError::Sign(format!("no object at {path}")));
        }
        let token = self.mint_counter.fetch_add(1, Ordering::Relaxed);
        Ok(format!(
            "memory://{path}?token={token}&expires={}",
            expires_in.as_secs()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_delete() {
        let blobs = InMemoryBlobStore::new();
        blobs
            .upload("posts/1/media.jpg", b"img".to_vec(), "image/jpeg")
            .await
            .unwrap();
        assert!(blobs.contains("posts/1/media.jpg").await);
        assert_eq!(
            blobs.content_type("posts/1/media.jpg").await.as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            blobs.bytes("posts/1/media.jpg").await.as_deref(),
            Some(&b"img"[..])
        );

        blobs.delete("posts/1/media.jpg").await.unwrap();
        assert!(!blobs.contains("posts/1/media.jpg").await);
    }

    #[tokio::test]
    async fn test_delete_missing_object_succeeds() {
        let blobs = InMemoryBlobStore::new();
        blobs.delete("posts/none/media.jpg").await.unwrap();
    }

    #[tokio::test]
    async fn test_signed_urls_are_minted_fresh() {
        let blobs = InMemoryBlobStore::new();
        blobs
            .upload("qr/qr.png", b"qr".to_vec(), "image/png")
            .await
            .unwrap();

        let ttl = Duration::from_secs(60);
        let first = blobs.signed_url("qr/qr.png", ttl).await.unwrap();
        let second = blobs.signed_url("qr/qr.png", ttl).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_signing_missing_object_fails() {
        let blobs = InMemoryBlobStore::new();
        let result = blobs
            .signed_url("posts/none/media.jpg", Duration::from_secs(60))
            .await;
        assert!(result.is_err());
    }
}
