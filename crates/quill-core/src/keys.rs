//! Document-store key layout.
//!
//! Every value this service persists lives under one of these keys. Comments
//! and replies have no keys of their own - they are embedded in the owning
//! post's document.

/// Ordered list of post ids, newest first.
pub const POST_INDEX: &str = "blog:post_ids";

/// The shared admin secret.
pub const ADMIN_PASSWORD: &str = "blog:admin_password";

/// Blob-store path of the site-wide QR image.
pub const QR_PATH: &str = "blog:qr_path";

/// Key of a single post document.
pub fn post(id: &str) -> String {
    format!("blog:post:{id}")
}
