//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All backends enabled
//! - `minimal` - No external dependencies, in-memory stores only
//! - `redis` - Redis-backed document store
//! - `s3` - S3-backed blob store with presigned URLs

pub mod blob;
pub mod document;

// Re-exports - In-Memory
pub use blob::InMemoryBlobStore;
pub use document::InMemoryDocumentStore;

// Re-exports - Backends
#[cfg(feature = "redis")]
pub use document::{RedisConfig, RedisDocumentStore};

#[cfg(feature = "s3")]
pub use blob::{S3BlobStore, S3Config};
