//! Post Aggregate Manager.
//!
//! Owns the post entity with its embedded comment threads, the newest-first
//! post index, and the read-side signed-URL enrichment. Every mutation is a
//! whole-document read-modify-write under a per-key lock; the index and the
//! post document remain two independent writes, so `list` tolerates (and
//! prunes) index entries whose document is gone.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::domain::{Comment, IdGenerator, MediaKind, Post, Reply};
use crate::error::{DomainError, StoreError};
use crate::keys;
use crate::ports::{BlobStore, DocumentStore};
use crate::service::SIGNED_URL_TTL;
use crate::service::locks::KeyLocks;
use crate::service::media::{MediaCoordinator, parse_data_uri};

/// Author label when a comment arrives without a name.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Author label when a reply arrives without a name.
pub const STAFF_AUTHOR: &str = "Admin";

/// Input for creating a post.
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub media: Option<NewMedia>,
}

/// Media payload accompanying a create or update.
pub struct NewMedia {
    pub kind: MediaKind,
    pub data_uri: String,
}

/// Partial update. `None` fields keep their prior values; blank strings are
/// ignored rather than used to blank a field.
#[derive(Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub media: MediaPatch,
}

/// The three media cases of an update.
#[derive(Default)]
pub enum MediaPatch {
    /// No media field in the request: leave media untouched.
    #[default]
    Keep,
    /// Explicit removal: delete the asset and clear both media fields.
    Remove,
    /// Replacement: delete the old asset, then upload the new one.
    Replace(NewMedia),
}

pub struct PostService {
    docs: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    media: MediaCoordinator,
    ids: IdGenerator,
    locks: KeyLocks,
}

impl PostService {
    pub fn new(docs: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            docs,
            media: MediaCoordinator::new(blobs.clone()),
            blobs,
            ids: IdGenerator::new(),
            locks: KeyLocks::new(),
        }
    }

    /// All posts in index order (newest first), enriched with signed URLs.
    ///
    /// An indexed id whose document is missing is skipped, not an error:
    /// index drift from a prior partial failure must not break listing. The
    /// stale ids are pruned from the stored index afterwards.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let ids = self.read_index().await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let post_keys: Vec<String> = ids.iter().map(|id| keys::post(id)).collect();
        let documents = self.docs.mget(&post_keys).await?;

        let mut posts = Vec::with_capacity(ids.len());
        let mut stale = Vec::new();
        for (id, document) in ids.iter().zip(documents) {
            match document {
                Some(value) => match decode_post(value) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!(post_id = %id, error = %e, "Skipping undecodable post document");
                    }
                },
                None => stale.push(id.clone()),
            }
        }

        if !stale.is_empty() {
            self.prune_index(&stale).await;
        }

        let mut enriched = Vec::with_capacity(posts.len());
        for post in posts {
            enriched.push(self.enrich(post).await);
        }
        Ok(enriched)
    }

    /// A single post by id, enriched.
    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        let post = self.require(id).await?;
        Ok(self.enrich(post).await)
    }

    /// Create a post, materializing its media asset (if any) before the
    /// document is written, and prepend its id to the index.
    pub async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        require_text("title", &new.title)?;
        require_text("content", &new.content)?;
        require_text("category", &new.category)?;

        let id = self.ids.next_id();
        let mut post = Post::new(id.clone(), new.title, new.content, new.category);

        if let Some(media) = new.media {
            let path = self.media.attach(&id, media.kind, &media.data_uri).await?;
            post.media_path = Some(path);
            post.media_type = Some(media.kind);
        }

        self.persist(&post).await?;

        {
            let _guard = self.locks.acquire(keys::POST_INDEX).await;
            let mut ids = self.read_index().await?;
            ids.insert(0, id);
            self.write_index(&ids).await?;
        }

        Ok(self.enrich(post).await)
    }

    /// Apply a partial update. The index is never reordered by an update.
    pub async fn update(&self, id: &str, patch: PostPatch) -> Result<Post, DomainError> {
        let key = keys::post(id);
        let _guard = self.locks.acquire(&key).await;
        let mut post = self.require(id).await?;

        if let Some(title) = patch.title.filter(|t| !t.trim().is_empty()) {
            post.title = title;
        }
        if let Some(content) = patch.content.filter(|c| !c.trim().is_empty()) {
            post.content = content;
        }
        if let Some(category) = patch.category.filter(|c| !c.trim().is_empty()) {
            post.category = category;
        }

        match patch.media {
            MediaPatch::Keep => {}
            MediaPatch::Remove => {
                if let Some(old) = post.media_path.take() {
                    self.media.detach(&old).await?;
                }
                post.media_type = None;
            }
            MediaPatch::Replace(media) => {
                // Validate the new payload before the old asset is touched;
                // only then delete it, so the post never owns two assets at
                // once and a bad payload leaves it unchanged.
                let decoded = parse_data_uri(&media.data_uri)?;
                if let Some(old) = post.media_path.take() {
                    self.media.detach(&old).await?;
                }
                let path = self.media.attach_decoded(id, media.kind, decoded).await?;
                post.media_path = Some(path);
                post.media_type = Some(media.kind);
            }
        }

        self.persist(&post).await?;
        Ok(self.enrich(post).await)
    }

    /// Delete a post: media asset, document, and index entry, each
    /// independently, so a missing document does not block index cleanup.
    /// Deleting an absent post succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let key = keys::post(id);
        {
            let _guard = self.locks.acquire(&key).await;
            match self.load(id).await {
                Ok(Some(post)) => {
                    if let Some(path) = &post.media_path {
                        if let Err(e) = self.media.detach(path).await {
                            tracing::warn!(post_id = %id, error = %e, "Failed to delete media of removed post");
                        }
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(post_id = %id, error = %e, "Could not load post before delete; skipping media cleanup");
                }
            }
            self.docs.delete(&key).await?;
        }

        let _guard = self.locks.acquire(keys::POST_INDEX).await;
        let ids = self.read_index().await?;
        let kept: Vec<String> = ids.into_iter().filter(|existing| existing != id).collect();
        self.write_index(&kept).await?;
        Ok(())
    }

    /// Append a comment to a post. Blank authors fall back to the anonymous
    /// label; display order is insertion order.
    pub async fn add_comment(
        &self,
        post_id: &str,
        author: Option<String>,
        content: &str,
    ) -> Result<Comment, DomainError> {
        require_text("content", content)?;

        let key = keys::post(post_id);
        let _guard = self.locks.acquire(&key).await;
        let mut post = self.require(post_id).await?;

        let comment = Comment {
            id: self.ids.next_id(),
            author: author_or(author, ANONYMOUS_AUTHOR),
            content: content.trim().to_string(),
            created_at: Utc::now(),
            replies: Vec::new(),
        };
        post.comments.push(comment.clone());
        self.persist(&post).await?;
        Ok(comment)
    }

    /// Remove a comment by id. A nonexistent comment id is a no-op success.
    pub async fn delete_comment(&self, post_id: &str, comment_id: &str) -> Result<(), DomainError> {
        let key = keys::post(post_id);
        let _guard = self.locks.acquire(&key).await;
        let mut post = self.require(post_id).await?;

        post.comments.retain(|comment| comment.id != comment_id);
        self.persist(&post).await?;
        Ok(())
    }

    /// Append a reply to a comment thread.
    pub async fn add_reply(
        &self,
        post_id: &str,
        comment_id: &str,
        author: Option<String>,
        content: &str,
    ) -> Result<Reply, DomainError> {
        require_text("content", content)?;

        let key = keys::post(post_id);
        let _guard = self.locks.acquire(&key).await;
        let mut post = self.require(post_id).await?;

        let comment = post
            .comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))?;

        let reply = Reply {
            id: self.ids.next_id(),
            author: author_or(author, STAFF_AUTHOR),
            content: content.trim().to_string(),
            created_at: Utc::now(),
        };
        comment.replies.push(reply.clone());
        self.persist(&post).await?;
        Ok(reply)
    }

    /// Remove a reply by id. A nonexistent reply id is a no-op success, but
    /// the post and comment must exist.
    pub async fn delete_reply(
        &self,
        post_id: &str,
        comment_id: &str,
        reply_id: &str,
    ) -> Result<(), DomainError> {
        let key = keys::post(post_id);
        let _guard = self.locks.acquire(&key).await;
        let mut post = self.require(post_id).await?;

        let comment = post
            .comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))?;

        comment.replies.retain(|reply| reply.id != reply_id);
        self.persist(&post).await?;
        Ok(())
    }

    /// Resolve the stored media path into a fresh signed URL. Signing
    /// failures degrade the post (no URL) instead of failing the read.
    async fn enrich(&self, mut post: Post) -> Post {
        if let Some(path) = &post.media_path {
            match self.blobs.signed_url(path, SIGNED_URL_TTL).await {
                Ok(url) => post.media_url = Some(url),
                Err(e) => {
                    tracing::warn!(post_id = %post.id, path = %path, error = %e, "Failed to sign media URL; serving post without media");
                    post.media_url = None;
                }
            }
        }
        post
    }

    async fn load(&self, id: &str) -> Result<Option<Post>, DomainError> {
        match self.docs.get(&keys::post(id)).await? {
            Some(value) => Ok(Some(decode_post(value)?)),
            None => Ok(None),
        }
    }

    async fn require(&self, id: &str) -> Result<Post, DomainError> {
        self.load(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    /// Write the post document back. Signed URLs are transient and never
    /// persisted.
    async fn persist(&self, post: &Post) -> Result<(), DomainError> {
        let mut stored = post.clone();
        stored.media_url = None;
        let value =
            serde_json::to_value(&stored).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.docs.set(&keys::post(&post.id), value).await?;
        Ok(())
    }

    async fn read_index(&self) -> Result<Vec<String>, DomainError> {
        match self.docs.get(keys::POST_INDEX).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| StoreError::Serialization(e.to_string()).into()),
            None => Ok(Vec::new()),
        }
    }

    async fn write_index(&self, ids: &[String]) -> Result<(), DomainError> {
        let value =
            serde_json::to_value(ids).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.docs.set(keys::POST_INDEX, value).await?;
        Ok(())
    }

    /// Drop ids without a backing document from the stored index. Re-reads
    /// the index under the lock so concurrent prepends survive. Best-effort:
    /// the next listing heals again if this write fails.
    async fn prune_index(&self, stale: &[String]) {
        let _guard = self.locks.acquire(keys::POST_INDEX).await;
        let result: Result<(), DomainError> = async {
            let ids = self.read_index().await?;
            let kept: Vec<String> = ids.into_iter().filter(|id| !stale.contains(id)).collect();
            self.write_index(&kept).await
        }
        .await;
        match result {
            Ok(()) => {
                tracing::info!(count = stale.len(), "Pruned stale ids from post index");
            }
            Err(e) => tracing::warn!(error = %e, "Failed to prune post index"),
        }
    }
}

fn decode_post(value: Value) -> Result<Post, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn require_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn author_or(author: Option<String>, fallback: &str) -> String {
    match author.map(|a| a.trim().to_string()) {
        Some(a) if !a.is_empty() => a,
        _ => fallback.to_string(),
    }
}
