//! Post endpoints.

use actix_web::{HttpResponse, web};

use quill_core::domain::MediaKind;
use quill_core::service::{MediaPatch, NewMedia, NewPost, PostPatch};
use quill_shared::dto::{CreatePostRequest, UpdatePostRequest};
use quill_shared::response::{OkBody, PostBody, PostsBody};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    Ok(HttpResponse::Ok().json(PostsBody { posts }))
}

/// GET /posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let post = state.posts.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostBody { post }))
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (Some(title), Some(content), Some(category)) = (req.title, req.content, req.category)
    else {
        return Err(AppError::BadRequest(
            "Missing required fields (title, content, category)".to_string(),
        ));
    };

    let media = parse_media(req.media_data, req.media_type)?;
    let post = state
        .posts
        .create(NewPost {
            title,
            content,
            category,
            media,
        })
        .await?;

    Ok(HttpResponse::Created().json(PostBody { post }))
}

/// PUT /posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let media = match req.media_data {
        // Field absent: leave media untouched.
        None => MediaPatch::Keep,
        // Explicit null: remove the media asset.
        Some(None) => MediaPatch::Remove,
        Some(Some(data)) => match parse_media(Some(data), req.media_type)? {
            Some(media) => MediaPatch::Replace(media),
            None => MediaPatch::Keep,
        },
    };

    let post = state
        .posts
        .update(
            &path.into_inner(),
            PostPatch {
                title: req.title,
                content: req.content,
                category: req.category,
                media,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostBody { post }))
}

/// DELETE /posts/{id} - idempotent, an absent post does not error.
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OkBody::new()))
}

/// Pair up `mediaData`/`mediaType`, rejecting one without the other.
fn parse_media(
    media_data: Option<String>,
    media_type: Option<String>,
) -> Result<Option<NewMedia>, AppError> {
    match (media_data, media_type) {
        (Some(data_uri), Some(kind)) => {
            let kind: MediaKind = kind.parse().map_err(AppError::BadRequest)?;
            Ok(Some(NewMedia { kind, data_uri }))
        }
        (None, None) | (None, Some(_)) => Ok(None),
        (Some(_), None) => Err(AppError::BadRequest(
            "mediaType is required when mediaData is provided".to_string(),
        )),
    }
}
