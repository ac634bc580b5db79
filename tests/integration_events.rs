mod common;

use common::{create_event, event_body, memory_store, register, spawn_server};
use serde_json::{Value, json};

#[tokio::test]
async fn create_then_fetch_event() {
    let addr = spawn_server(memory_store()).await;
    let client = reqwest::Client::new();

    let body = json!({
        "title": "Rust meetup",
        "description": "Monthly meetup",
        "date": "2099-03-15T18:30:00Z",
        "capacity": 40,
        "category": "Tech",
        "location": "Room 4"
    });
    let id = create_event(&client, addr, &body).await;

    let res = client
        .get(format!("http://{}/events/{}", addr, id))
        .send()
        .await
        .expect("request failed");
    assert_eq!(res.status().as_u16(), 200);
    let event: Value = res.json().await.expect("json");
    assert_eq!(event["id"], id.as_str());
    assert_eq!(event["title"], "Rust meetup");
    assert_eq!(event["description"], "Monthly meetup");
    assert_eq!(event["date"], "2099-03-15T18:30:00Z");
    assert_eq!(event["capacity"], 40);
    assert_eq!(event["category"], "Tech");
    assert_eq!(event["location"], "Room 4");
    assert_eq!(event["_count"]["attendees"], 0);
}

#[tokio::test]
async fn events_are_listed_by_ascending_date() {
    let addr = spawn_server(memory_store()).await;
    let client = reqwest::Client::new();

    create_event(&client, addr, &event_body("Third", "2099-12-01T00:00:00Z", 5)).await;
    create_event(&client, addr, &event_body("First", "2099-01-01", 5)).await;
    create_event(&client, addr, &event_body("Second", "2099-06-01T09:00", 5)).await;

    let res = client
        .get(format!("http://{}/events", addr))
        .send()
        .await
        .expect("request failed");
    assert_eq!(res.status().as_u16(), 200);
    let events: Vec<Value> = res.json().await.expect("json");
    let titles: Vec<&str> = events.iter().filter_map(|e| e["title"].as_str()).collect();
    assert_eq!(titles, ["First", "Second", "Third"]);
}

#[tokio::test]
async fn delete_event_cascades_to_attendees() {
    let addr = spawn_server(memory_store()).await;
    let client = reqwest::Client::new();

    let id = create_event(&client, addr, &event_body("Doomed", "2099-01-01T00:00:00Z", 10)).await;
    for i in 0..3 {
        let res = register(&client, addr, &id, json!({"name": format!("N{i}"), "email": format!("n{i}@x.com")})).await;
        assert_eq!(res.status().as_u16(), 201);
    }

    let res = client
        .delete(format!("http://{}/events/{}", addr, id))
        .send()
        .await
        .expect("request failed");
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["success"], true);

    let res = client
        .get(format!("http://{}/events/{}", addr, id))
        .send()
        .await
        .expect("request failed");
    assert_eq!(res.status().as_u16(), 404);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["error"], "Event not found");

    let all: Vec<Value> = client
        .get(format!("http://{}/attendees", addr))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("json");
    assert!(all.is_empty());
}
