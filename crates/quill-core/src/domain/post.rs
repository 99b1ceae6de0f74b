use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of media a post can carry. Determines the stored file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// File extension used for the post's media asset.
    pub fn extension(self) -> &'static str {
        match self {
            MediaKind::Image => "jpg",
            MediaKind::Video => "mp4",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(format!("unknown media type: {other}")),
        }
    }
}

/// Blob-store path for a post's media asset.
///
/// Deterministic per post and kind, so a post can never own more than one
/// live asset of a given kind.
pub fn media_path(post_id: &str, kind: MediaKind) -> String {
    format!("posts/{post_id}/media.{}", kind.extension())
}

/// Post aggregate - the unit of persistence.
///
/// Comments and replies are embedded: they have no storage rows of their own
/// and are only ever mutated through a whole-document read-modify-write of
/// the owning post.
///
/// Invariant: `media_path` and `media_type` are both `None` or both `Some`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub media_path: Option<String>,
    pub media_type: Option<MediaKind>,
    /// Transient signed URL, minted fresh on every read. Persisted as null.
    #[serde(default)]
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn new(id: String, title: String, content: String, category: String) -> Self {
        Self {
            id,
            title,
            content,
            category,
            media_path: None,
            media_type: None,
            media_url: None,
            created_at: Utc::now(),
            comments: Vec::new(),
        }
    }
}

/// Comment on a post, ordered by insertion (oldest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// Reply within a comment thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
