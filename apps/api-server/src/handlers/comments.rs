//! Comment and reply endpoints. Both collections live embedded in the post
//! document; every mutation here is a whole-post read-modify-write.

use actix_web::{HttpResponse, web};

use quill_shared::dto::NewCommentRequest;
use quill_shared::response::{CommentBody, OkBody, ReplyBody};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NewCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let comment = state
        .posts
        .add_comment(
            &path.into_inner(),
            req.author,
            req.content.as_deref().unwrap_or(""),
        )
        .await?;
    Ok(HttpResponse::Created().json(CommentBody { comment }))
}

/// DELETE /posts/{id}/comments/{cid} - idempotent for the comment id.
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state.posts.delete_comment(&post_id, &comment_id).await?;
    Ok(HttpResponse::Ok().json(OkBody::new()))
}

/// POST /posts/{id}/comments/{cid}/replies
pub async fn add_reply(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<NewCommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let req = body.into_inner();
    let reply = state
        .posts
        .add_reply(
            &post_id,
            &comment_id,
            req.author,
            req.content.as_deref().unwrap_or(""),
        )
        .await?;
    Ok(HttpResponse::Created().json(ReplyBody { reply }))
}

/// DELETE /posts/{id}/comments/{cid}/replies/{rid} - idempotent for the
/// reply id.
pub async fn delete_reply(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id, reply_id) = path.into_inner();
    state
        .posts
        .delete_reply(&post_id, &comment_id, &reply_id)
        .await?;
    Ok(HttpResponse::Ok().json(OkBody::new()))
}
