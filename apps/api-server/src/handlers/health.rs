//! Health check endpoint.

use actix_web::HttpResponse;

use quill_shared::response::HealthBody;

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthBody::ok())
}
