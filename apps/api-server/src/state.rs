//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{BlobStore, DocumentStore};
use quill_core::service::{AdminGate, PostService, QrSettings};
use quill_infra::{InMemoryBlobStore, InMemoryDocumentStore};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub admin: Arc<AdminGate>,
    pub qr: Arc<QrSettings>,
}

impl AppState {
    /// Build the application state with the configured store backends,
    /// falling back to in-memory stores when a backend is unavailable.
    pub async fn new(config: &AppConfig) -> Self {
        let docs = Self::document_store(config).await;
        let blobs = Self::blob_store(config).await;

        tracing::info!("Application state initialized");

        Self::with_stores(docs, blobs)
    }

    /// Wire the services onto explicit stores. Used directly by tests.
    pub fn with_stores(docs: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            posts: Arc::new(PostService::new(docs.clone(), blobs.clone())),
            admin: Arc::new(AdminGate::new(docs.clone())),
            qr: Arc::new(QrSettings::new(docs, blobs)),
        }
    }

    #[cfg(feature = "redis")]
    async fn document_store(config: &AppConfig) -> Arc<dyn DocumentStore> {
        if let Some(redis_config) = config.redis.clone() {
            match quill_infra::RedisDocumentStore::new(redis_config).await {
                Ok(store) => return Arc::new(store),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to Redis: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("REDIS_URL not set. Documents are stored in memory only.");
        }
        Arc::new(InMemoryDocumentStore::new())
    }

    #[cfg(not(feature = "redis"))]
    async fn document_store(_config: &AppConfig) -> Arc<dyn DocumentStore> {
        tracing::info!("Running without redis feature - using in-memory document store");
        Arc::new(InMemoryDocumentStore::new())
    }

    #[cfg(feature = "s3")]
    async fn blob_store(config: &AppConfig) -> Arc<dyn BlobStore> {
        if let Some(s3_config) = config.s3.clone() {
            match quill_infra::S3BlobStore::new(s3_config).await {
                Ok(store) => return Arc::new(store),
                Err(e) => {
                    tracing::error!("Failed to set up S3: {}. Using in-memory fallback.", e);
                }
            }
        } else {
            tracing::warn!("S3_BUCKET not set. Media is stored in memory only.");
        }
        Arc::new(InMemoryBlobStore::new())
    }

    #[cfg(not(feature = "s3"))]
    async fn blob_store(_config: &AppConfig) -> Arc<dyn BlobStore> {
        tracing::info!("Running without s3 feature - using in-memory blob store");
        Arc::new(InMemoryBlobStore::new())
    }
}
