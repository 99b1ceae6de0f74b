//! S3-backed blob store with presigned read URLs.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;

use quill_core::error::BlobError;
use quill_core::ports::BlobStore;

/// S3 connection configuration.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket holding all blog media.
    pub bucket: String,
    /// AWS region; falls back to the SDK's default provider chain.
    pub region: Option<String>,
    /// Endpoint override for S3-compatible stores (MinIO, LocalStack).
    pub endpoint_url: Option<String>,
}

impl S3Config {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: None,
            endpoint_url: None,
        }
    }

    /// Load configuration from environment variables. Returns `None` when no
    /// bucket is configured.
    pub fn from_env() -> Option<Self> {
        let bucket = std::env::var("S3_BUCKET").ok()?;
        Some(Self {
            bucket,
            region: std::env::var("AWS_REGION").ok(),
            endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
        })
    }
}

/// Blob store over a single private S3 bucket. Read access is granted only
/// through presigned GET URLs.
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    pub async fn new(config: S3Config) -> Result<Self, BlobError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        let store = Self {
            client,
            bucket: config.bucket,
        };
        store.ensure_bucket().await;

        tracing::info!(bucket = %store.bucket, "Connected to S3 blob store");
        Ok(store)
    }

    /// Idempotent bucket init: create the private bucket if it does not
    /// exist yet, tolerating already-exists responses.
    async fn ensure_bucket(&self) {
        if let Err(e) = self
            .client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
        {
            tracing::debug!(bucket = %self.bucket, error = %e, "Bucket create skipped");
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BlobError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| BlobError::Operation(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), BlobError> {
        // S3 DeleteObject on a missing key succeeds, which matches the
        // port's idempotent-delete contract.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| BlobError::Operation(e.to_string()))?;
        Ok(())
    }

    async fn signed_url(&self, path: &str, expires_in: Duration) -> Result<String, BlobError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| BlobError::Sign(e.to_string()))?;
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .presigned(presigning)
            .await
            .map_err(|e| BlobError::Sign(e.to_string()))?;
        Ok(presigned.uri().to_string())
    }
}
