use std::time::Duration;

use async_trait::async_trait;

use crate::error::BlobError;

/// Blob store port - external object storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `bytes` to `path`, replacing any existing object.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BlobError>;

    /// Delete the object at `path`. Deleting a missing object succeeds.
    async fn delete(&self, path: &str) -> Result<(), BlobError>;

    /// Mint a time-limited signed read URL for the object at `path`.
    async fn signed_url(&self, path: &str, expires_in: Duration) -> Result<String, BlobError>;
}
