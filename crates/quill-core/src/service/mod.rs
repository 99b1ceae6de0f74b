//! Services - the blog's storage semantics over the store ports.

mod admin;
mod locks;
mod media;
mod posts;
mod settings;

pub use admin::{AdminGate, DEFAULT_ADMIN_PASSWORD};
pub use media::MediaCoordinator;
pub use posts::{
    ANONYMOUS_AUTHOR, MediaPatch, NewMedia, NewPost, PostPatch, PostService, STAFF_AUTHOR,
};
pub use settings::QrSettings;

/// Signed URLs handed to readers stay valid for seven days.
pub(crate) const SIGNED_URL_TTL: std::time::Duration =
    std::time::Duration::from_secs(7 * 24 * 60 * 60);
