//! Admin endpoints - the only credential-gated routes.

use actix_web::{HttpResponse, web};

use quill_core::DomainError;
use quill_shared::dto::{ChangePasswordRequest, VerifyAdminRequest};
use quill_shared::response::{ErrorBody, OkBody};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /admin/verify
pub async fn verify(
    state: web::Data<AppState>,
    body: web::Json<VerifyAdminRequest>,
) -> AppResult<HttpResponse> {
    let Some(password) = body.into_inner().password.filter(|p| !p.is_empty()) else {
        return Err(AppError::BadRequest("Password required".to_string()));
    };

    if state.admin.verify(&password).await? {
        Ok(HttpResponse::Ok().json(OkBody::new()))
    } else {
        Ok(HttpResponse::Unauthorized().json(ErrorBody::not_ok("Invalid password")))
    }
}

/// PUT /admin/password
pub async fn change_password(
    state: web::Data<AppState>,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let current = req.current_password.filter(|p| !p.is_empty());
    let next = req.new_password.filter(|p| !p.is_empty());
    let (Some(current), Some(next)) = (current, next) else {
        return Err(AppError::BadRequest(
            "Both currentPassword and newPassword required".to_string(),
        ));
    };

    state
        .admin
        .change_password(&current, &next)
        .await
        .map_err(|e| match e {
            DomainError::Unauthorized => {
                AppError::Unauthorized("Current password incorrect".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(OkBody::new()))
}
