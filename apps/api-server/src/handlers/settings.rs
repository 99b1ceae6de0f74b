//! Site settings endpoints - the singleton QR image.

use actix_web::{HttpResponse, web};

use quill_shared::dto::SetQrRequest;
use quill_shared::response::{OkBody, QrBody};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /settings/qr
pub async fn get_qr(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let qr_image_url = state.qr.get().await?;
    Ok(HttpResponse::Ok().json(QrBody { qr_image_url }))
}

/// POST /settings/qr
pub async fn set_qr(
    state: web::Data<AppState>,
    body: web::Json<SetQrRequest>,
) -> AppResult<HttpResponse> {
    let Some(image_data) = body.into_inner().image_data.filter(|d| !d.is_empty()) else {
        return Err(AppError::BadRequest("imageData is required".to_string()));
    };

    let qr_image_url = state.qr.set(&image_data).await?;
    Ok(HttpResponse::Ok().json(QrBody { qr_image_url }))
}

/// DELETE /settings/qr - idempotent.
pub async fn delete_qr(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    state.qr.delete().await?;
    Ok(HttpResponse::Ok().json(OkBody::new()))
}
