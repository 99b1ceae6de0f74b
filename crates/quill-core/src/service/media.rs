//! Media Lifecycle Coordinator.
//!
//! Solely responsible for creating and removing post media assets. Replace
//! and delete sequences always remove the old object before adding a new one,
//! so a post is never billed for two live assets at once. A crash between the
//! two steps leaves a brief window with zero assets; that gap is accepted.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::domain::{MediaKind, media_path};
use crate::error::DomainError;
use crate::ports::BlobStore;

pub(crate) struct DecodedMedia {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Decode a `data:<content-type>;base64,<payload>` URI.
pub(crate) fn parse_data_uri(uri: &str) -> Result<DecodedMedia, DomainError> {
    let invalid = || DomainError::validation("Invalid base64 data URI");
    let rest = uri.strip_prefix("data:").ok_or_else(invalid)?;
    let (content_type, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
    if content_type.is_empty() {
        return Err(invalid());
    }
    let bytes = BASE64.decode(payload).map_err(|_| invalid())?;
    Ok(DecodedMedia {
        content_type: content_type.to_string(),
        bytes,
    })
}

/// Binds a post's media reference to the blob store.
pub struct MediaCoordinator {
    blobs: Arc<dyn BlobStore>,
}

impl MediaCoordinator {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Upload a post's media asset to its deterministic path and return it.
    pub async fn attach(
        &self,
        post_id: &str,
        kind: MediaKind,
        data_uri: &str,
    ) -> Result<String, DomainError> {
        let media = parse_data_uri(data_uri)?;
        self.attach_decoded(post_id, kind, media).await
    }

    /// Upload an already-decoded payload. Callers replacing an existing
    /// asset parse first, so a malformed payload cannot leave the post
    /// pointing at a deleted object.
    pub(crate) async fn attach_decoded(
        &self,
        post_id: &str,
        kind: MediaKind,
        media: DecodedMedia,
    ) -> Result<String, DomainError> {
        let path = media_path(post_id, kind);
        self.blobs
            .upload(&path, media.bytes, &media.content_type)
            .await?;
        Ok(path)
    }

    /// Delete a media asset. A missing object counts as success.
    pub async fn detach(&self, path: &str) -> Result<(), DomainError> {
        self.blobs.delete(path).await?;
        Ok(())
    }
}
