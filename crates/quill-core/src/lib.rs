//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains the blog data model, the storage ports, and the
//! services that keep posts, embedded comment threads, and media assets
//! consistent - with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod keys;
pub mod ports;
pub mod service;

pub use error::DomainError;
