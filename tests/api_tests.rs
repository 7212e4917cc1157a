//! HTTP API tests
//!
//! Exercises the routes through `actix_web::test` against a memory store.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use smartlinker::api::services::{AppStartTime, configure};
use smartlinker::config::LinksConfig;
use smartlinker::services::LinkService;
use smartlinker::storage::backend::retry::RetryConfig;
use smartlinker::storage::{FileStore, LinkStore, MemoryStore};
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

fn setup_service(config: LinksConfig) -> Arc<LinkService> {
    Arc::new(LinkService::new(Arc::new(MemoryStore::new()), config))
}

macro_rules! init_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($service.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(configure),
        )
        .await
    };
}

async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

fn create_body() -> Value {
    json!({
        "title": "Song A",
        "artist": "Artist A",
        "platforms": { "Spotify": "https://open.spotify.com/track/x" }
    })
}

// =============================================================================
// POST /api/create-link
// =============================================================================

#[actix_rt::test]
async fn test_create_link_returns_id_and_url() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/create-link")
        .set_json(create_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    let id = body["linkId"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 8);
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("http://"));
    assert!(url.ends_with(&format!("/l/{}", id)));

    let stored = service.get_link(&id).await.unwrap();
    assert_eq!(stored.clicks, 0);
    assert!(stored.platform_clicks.is_empty());
}

#[actix_rt::test]
async fn test_create_link_uses_public_base_url() {
    let service = setup_service(LinksConfig {
        public_base_url: Some("https://music.example.com/".to_string()),
        ..LinksConfig::default()
    });
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/create-link")
        .set_json(create_body())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let id = body["linkId"].as_str().unwrap();
    assert_eq!(
        body["url"].as_str().unwrap(),
        format!("https://music.example.com/l/{}", id)
    );
}

#[actix_rt::test]
async fn test_create_link_without_platforms_is_rejected() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/create-link")
        .set_json(json!({ "title": "Song", "artist": "Band", "platforms": {} }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert_eq!(service.store().count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_malformed_json_gets_error_body() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/create-link")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ title: ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid request body"));
}

// =============================================================================
// GET /l/{linkId}
// =============================================================================

#[actix_rt::test]
async fn test_landing_page_renders_and_counts_view() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);
    let link = service
        .create_link(serde_json::from_value(create_body()).unwrap())
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/l/{}", link.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("Content-Type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_text(resp).await;
    assert!(html.contains("<h1>Song A</h1>"));
    assert!(html.contains("https://open.spotify.com/track/x"));

    assert_eq!(service.get_link(&link.id).await.unwrap().clicks, 1);
}

#[actix_rt::test]
async fn test_landing_page_escapes_user_text() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);
    let link = service
        .create_link(
            serde_json::from_value(json!({
                "title": "<script>alert(1)</script>",
                "artist": "Tom & \"Jerry\"",
                "platforms": { "Deezer": "https://deezer.com/t/1?a=1&b='2'" }
            }))
            .unwrap(),
        )
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/l/{}", link.id))
        .to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();

    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
    assert!(html.contains("a=1&amp;b=&#039;2&#039;"));
}

#[actix_rt::test]
async fn test_landing_page_errors() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);

    let req = test::TestRequest::get().uri("/l/bad_id").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(resp).await, "Invalid link ID format");

    let req = test::TestRequest::get().uri("/l/Missing1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "Link not found");
}

// =============================================================================
// POST /api/track-click
// =============================================================================

#[actix_rt::test]
async fn test_track_click_counts_platform() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);
    let link = service
        .create_link(serde_json::from_value(create_body()).unwrap())
        .await
        .unwrap();

    let view = test::TestRequest::get()
        .uri(&format!("/l/{}", link.id))
        .to_request();
    test::call_service(&app, view).await;

    let req = test::TestRequest::post()
        .uri("/api/track-click")
        .set_json(json!({ "linkId": link.id, "platform": "Spotify" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "success": true }));

    let stored = service.get_link(&link.id).await.unwrap();
    assert_eq!(stored.clicks, 1);
    assert_eq!(stored.platform_click_count("Spotify"), 1);
}

#[actix_rt::test]
async fn test_track_click_unknown_link_succeeds_silently() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/track-click")
        .set_json(json!({ "linkId": "Missing1", "platform": "Spotify" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(service.store().count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_track_click_rejects_malformed_fields() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);

    for payload in [
        json!({ "linkId": "AbCd1234" }),
        json!({ "platform": "Spotify" }),
        json!({ "linkId": "Ab<d1234", "platform": "Spotify" }),
        json!({ "linkId": "AbCd1234", "platform": "<b>Spotify</b>" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/track-click")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", payload);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}

// =============================================================================
// GET /api/links, DELETE /api/links/{id}, GET /health
// =============================================================================

#[actix_rt::test]
async fn test_list_links_returns_document() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);
    let link = service
        .create_link(serde_json::from_value(create_body()).unwrap())
        .await
        .unwrap();

    let req = test::TestRequest::get().uri("/api/links").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let entry = &body[link.id.as_str()];
    assert_eq!(entry["id"], link.id.as_str());
    assert_eq!(entry["title"], "Song A");
    assert_eq!(entry["clicks"], 0);
    assert!(entry["platformClicks"].is_object());
    assert!(entry["created"].is_string());
}

#[actix_rt::test]
async fn test_delete_link_route() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);
    let link = service
        .create_link(serde_json::from_value(create_body()).unwrap())
        .await
        .unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/links/{}", link.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/links/{}", link.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_health_reports_backend_and_count() {
    let service = setup_service(LinksConfig::default());
    let app = init_app!(service);
    service
        .create_link(serde_json::from_value(create_body()).unwrap())
        .await
        .unwrap();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["links"], 1);
}

// =============================================================================
// File backend end to end
// =============================================================================

#[actix_rt::test]
async fn test_visit_and_click_are_durable_on_file_backend() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.json");
    let store = FileStore::open_path(&path, RetryConfig::default())
        .await
        .unwrap();
    let service = Arc::new(LinkService::new(Arc::new(store), LinksConfig::default()));
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/create-link")
        .set_json(create_body())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["linkId"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/l/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/track-click")
        .set_json(json!({ "linkId": id, "platform": "Spotify" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let reopened = FileStore::open_path(&path, RetryConfig::default())
        .await
        .unwrap();
    let link = reopened.get(&id).await.unwrap().unwrap();
    assert_eq!(link.clicks, 1);
    assert_eq!(link.platform_click_count("Spotify"), 1);

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk[id.as_str()]["clicks"], 1);
    assert_eq!(on_disk[id.as_str()]["platformClicks"], json!({ "Spotify": 1 }));
}
