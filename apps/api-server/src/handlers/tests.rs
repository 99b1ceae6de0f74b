//! HTTP-level tests over in-memory stores.

use std::sync::Arc;

use actix_web::{App, test, web};
use serde_json::{Value, json};

use quill_infra::{InMemoryBlobStore, InMemoryDocumentStore};

use crate::state::AppState;

fn fresh_state() -> AppState {
    AppState::with_stores(
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(InMemoryBlobStore::new()),
    )
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(fresh_state()))
                .configure(super::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = test_app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "ok"}));
}

#[actix_web::test]
async fn post_lifecycle_scenario() {
    let app = test_app!();

    // Create without media.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": "T", "content": "<p>hi</p>", "category": "AP"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let post = &body["post"];
    assert_eq!(post["title"], "T");
    assert_eq!(post["mediaPath"], Value::Null);
    assert_eq!(post["mediaType"], Value::Null);
    let post_id = post["id"].as_str().unwrap().to_string();

    // Add a comment without an author: the anonymous fallback applies.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{post_id}/comments"))
            .set_json(json!({"content": "nice"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["comment"]["author"], "Anonymous");
    assert_eq!(body["comment"]["content"], "nice");

    // Delete the post.
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/posts/{post_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"ok": true}));

    // Gone from direct lookup and from the listing.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{post_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/posts").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["posts"], json!([]));
}

#[actix_web::test]
async fn create_requires_all_fields() {
    let app = test_app!();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": "T"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn update_with_null_media_removes_it() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({
                "title": "T",
                "content": "<p>hi</p>",
                "category": "AP",
                "mediaData": "data:image/jpeg;base64,/9j/4AA=",
                "mediaType": "image",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let post_id = body["post"]["id"].as_str().unwrap().to_string();
    assert!(body["post"]["mediaPath"].is_string());
    assert!(body["post"]["mediaUrl"].is_string());

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/posts/{post_id}"))
            .set_json(json!({"mediaData": null}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["mediaPath"], Value::Null);
    assert_eq!(body["post"]["mediaType"], Value::Null);
}

#[actix_web::test]
async fn comment_on_missing_post_is_404_and_empty_content_is_400() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/nope/comments")
            .set_json(json!({"content": "hi"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": "T", "content": "c", "category": "AP"}))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let post_id = body["post"]["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{post_id}/comments"))
            .set_json(json!({"content": "  "}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn admin_verify_and_change_flow() {
    let app = test_app!();

    // Default secret works on a cold store.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/admin/verify")
            .set_json(json!({"password": "academy2026"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"ok": true}));

    // Wrong password: 401 with ok=false.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/admin/verify")
            .set_json(json!({"password": "nope"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], json!(false));

    // Missing password: 400.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/admin/verify")
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    // Change with wrong current: 401, secret unchanged.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/admin/password")
            .set_json(json!({"currentPassword": "nope", "newPassword": "next"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    // Change correctly, then only the new secret verifies.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/admin/password")
            .set_json(json!({"currentPassword": "academy2026", "newPassword": "next"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/admin/verify")
            .set_json(json!({"password": "next"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn qr_settings_round_trip() {
    let app = test_app!();

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/settings/qr").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"qrImageUrl": null}));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/settings/qr")
            .set_json(json!({"imageData": "data:image/png;base64,iVBORw0KGgo="}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["qrImageUrl"].is_string());

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/settings/qr").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/settings/qr").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"qrImageUrl": null}));
}
