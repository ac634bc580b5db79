#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use event_manager_api::config::CorsConfig;
use event_manager_api::create_app;
use event_manager_api::store::SharedStore;
use event_manager_api::store::memory::MemoryStore;
use serde_json::{Value, json};
use tokio::time::{Duration, sleep};

pub fn memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

/// Serve the app on an ephemeral port and return its address.
pub async fn spawn_server(store: SharedStore) -> SocketAddr {
    let app = create_app(store, &CorsConfig::Disabled);
    let host = std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let listener = tokio::net::TcpListener::bind(format!("{}:0", host)).await.expect("bind");
    let addr = listener.local_addr().unwrap();
    let server = axum::serve(listener, app.into_make_service());
    tokio::spawn(async move {
        server.await.unwrap();
    });
    // Give the server a moment to start
    sleep(Duration::from_millis(50)).await;
    addr
}

pub fn event_body(title: &str, date: &str, capacity: i64) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "date": date,
        "capacity": capacity,
    })
}

/// POST an event and return its id, asserting 201.
pub async fn create_event(client: &reqwest::Client, addr: SocketAddr, body: &Value) -> String {
    let res = client
        .post(format!("http://{}/events", addr))
        .json(body)
        .send()
        .await
        .expect("request failed");
    if res.status().as_u16() != 201 {
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        panic!("expected 201 but got {}: {}", status, text);
    }
    let created: Value = res.json().await.expect("json");
    created["id"].as_str().expect("id").to_string()
}

pub async fn register(
    client: &reqwest::Client,
    addr: SocketAddr,
    event_id: &str,
    body: Value,
) -> reqwest::Response {
    client
        .post(format!("http://{}/events/{}/attendees", addr, event_id))
        .json(&body)
        .send()
        .await
        .expect("request failed")
}
