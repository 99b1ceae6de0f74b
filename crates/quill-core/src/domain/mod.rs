//! Domain entities - the blog data model.

mod id;

mod post;

pub use id::IdGenerator;
pub use post::{Comment, MediaKind, Post, Reply, media_path};
