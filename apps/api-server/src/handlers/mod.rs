//! HTTP handlers and route configuration.

mod admin;
mod comments;
mod health;
mod posts;
mod settings;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/admin")
                .route("/verify", web::post().to(admin::verify))
                .route("/password", web::put().to(admin::change_password)),
        )
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list))
                .route("", web::post().to(posts::create))
                .route("/{id}", web::get().to(posts::get))
                .route("/{id}", web::put().to(posts::update))
                .route("/{id}", web::delete().to(posts::delete))
                .route("/{id}/comments", web::post().to(comments::add_comment))
                .route(
                    "/{id}/comments/{cid}",
                    web::delete().to(comments::delete_comment),
                )
                .route(
                    "/{id}/comments/{cid}/replies",
                    web::post().to(comments::add_reply),
                )
                .route(
                    "/{id}/comments/{cid}/replies/{rid}",
                    web::delete().to(comments::delete_reply),
                ),
        )
        .service(
            web::scope("/settings")
                .route("/qr", web::get().to(settings::get_qr))
                .route("/qr", web::post().to(settings::set_qr))
                .route("/qr", web::delete().to(settings::delete_qr)),
        );
}
