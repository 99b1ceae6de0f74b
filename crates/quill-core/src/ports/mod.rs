//! Ports - trait definitions for the external stores.
//! These are the "interfaces" that infrastructure must implement.

mod blob_store;
mod document_store;

pub use blob_store::BlobStore;
pub use document_store::DocumentStore;
