//! Response envelope types matching the API's wire contract.

use serde::{Deserialize, Serialize};

/// Error body: `{"error": "..."}`, plus `ok: false` where the endpoint
/// reports a verification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ok: None,
        }
    }

    pub fn not_ok(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ok: Some(false),
        }
    }
}

/// Plain acknowledgement: `{"ok": true}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkBody {
    pub ok: bool,
}

impl OkBody {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkBody {
    fn default() -> Self {
        Self::new()
    }
}

/// `{"status": "ok"}` health body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
}

impl HealthBody {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// `{"posts": [...]}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsBody<T> {
    pub posts: Vec<T>,
}

/// `{"post": {...}}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostBody<T> {
    pub post: T,
}

/// `{"comment": {...}}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentBody<T> {
    pub comment: T,
}

/// `{"reply": {...}}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyBody<T> {
    pub reply: T,
}

/// `{"qrImageUrl": ...}` envelope; null when no QR image is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrBody {
    pub qr_image_url: Option<String>,
}
