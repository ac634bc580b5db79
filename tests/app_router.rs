use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use event_manager_api::app::build_router;
use event_manager_api::config::CorsConfig;
use event_manager_api::create_app;
use event_manager_api::store::memory::MemoryStore;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for oneshot

fn app() -> axum::Router {
    create_app(Arc::new(MemoryStore::new()), &CorsConfig::Disabled)
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[test]
fn build_router_smoke() {
    let _router = build_router(&CorsConfig::Disabled);
}

#[tokio::test]
async fn health_reports_backend() {
    let resp = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["db"], "ok");
    assert_eq!(body["backend"], "memory");
}

#[tokio::test]
async fn unknown_event_is_404_with_error_body() {
    let resp = app()
        .oneshot(Request::get("/events/does-not-exist").body(Body::empty()).unwrap())
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Event not found");
}

#[tokio::test]
async fn create_event_returns_201_with_zero_count() {
    let payload = json!({
        "title": "Launch",
        "description": "d",
        "date": "2099-01-01T00:00:00Z",
        "capacity": "1",
        "location": "Main hall"
    });
    let resp = app().oneshot(post_json("/events", &payload)).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["title"], "Launch");
    assert_eq!(body["capacity"], 1);
    assert_eq!(body["location"], "Main hall");
    assert_eq!(body["_count"]["attendees"], 0);
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn create_event_validation_errors_are_400() {
    let payload = json!({ "title": "", "description": "", "date": "soon", "capacity": 0 });
    let resp = app().oneshot(post_json("/events", &payload)).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Validation error");
    let errors = &body["errors"];
    for field in ["title", "description", "date", "capacity"] {
        assert!(errors.get(field).is_some(), "missing error for {field}");
    }
}

#[tokio::test]
async fn malformed_json_is_400() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/events")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app().oneshot(req).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn register_against_missing_event_is_404() {
    let resp = app()
        .oneshot(post_json("/events/missing/attendees", &json!({"name": "A", "email": "a@x.com"})))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_event_is_404() {
    let req = Request::builder()
        .method(Method::DELETE)
        .uri("/events/missing")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

async fn preflight(cors: CorsConfig, origin: &str) -> axum::response::Response {
    let app = build_router(&cors);
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/events")
        .header("Origin", origin)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "Content-Type")
        .body(Body::empty())
        .unwrap();
    app.oneshot(req).await.expect("request failed")
}

#[tokio::test]
async fn cors_preflight_wildcard_allows_origin() {
    let resp = preflight(CorsConfig::Any, "http://example.com").await;
    assert!(resp.status().is_success());
    let allowed = resp
        .headers()
        .get("access-control-allow-origin")
        .map(|v| v.to_str().unwrap_or(""));
    assert_eq!(allowed, Some("*"));
    let methods = resp
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_uppercase();
    assert!(methods.contains("POST"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn cors_specific_origin_allowed() {
    let cors = CorsConfig::Origins(vec!["http://allowed.example.com".into()]);
    let resp = preflight(cors.clone(), "http://allowed.example.com").await;
    assert!(resp.status().is_success());
    let allowed = resp
        .headers()
        .get("access-control-allow-origin")
        .map(|v| v.to_str().unwrap_or(""));
    assert_eq!(allowed, Some("http://allowed.example.com"));

    let resp = preflight(cors, "http://evil.example.com").await;
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn cors_disabled_sends_no_headers() {
    let resp = preflight(CorsConfig::Disabled, "http://example.com").await;
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}
