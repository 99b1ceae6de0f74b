//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Deserializer, Serialize};

/// Wraps any present value (including `null`) in `Some`, so a double-`Option`
/// field can tell "absent" apart from "explicitly null".
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Request to verify the admin password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyAdminRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Request to change the admin password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Request to create a post. `media_data` is a base64 data URI; `media_type`
/// is `"image"` or `"video"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub media_data: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// Request to update a post. All fields optional; `media_data` distinguishes
/// absent (keep media) from explicit `null` (remove media) from a value
/// (replace media).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub media_data: Option<Option<String>>,
    pub media_type: Option<String>,
}

/// Request to add a comment or reply. A blank author gets a fallback label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Request to set the site QR image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQrRequest {
    #[serde(default)]
    pub image_data: Option<String>,
}
