// End-to-end tests: boot the router on an ephemeral port and talk HTTP to it.

use campus_assist_lib::core::{Matcher, MatcherOptions, SupportResponder};
use campus_assist_lib::kb::KnowledgeBase;
use campus_assist_lib::server::{self, AppState};
use campus_assist_lib::store::ChatLog;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

struct TestServer {
    base: String,
    chat_log: ChatLog,
    _temp: TempDir,
}

async fn start(map_path: Option<PathBuf>) -> TestServer {
    let temp = TempDir::new().unwrap();

    let matcher = Matcher::new(Arc::new(KnowledgeBase::builtin()), MatcherOptions::default());
    let chat_log = ChatLog::new(temp.path().join("chat_history.txt")).await.unwrap();
    let map_path = map_path.unwrap_or_else(|| temp.path().join("missing.png"));

    let state = AppState::new(matcher, SupportResponder::new(), chat_log.clone(), map_path);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, server::router(state)).await.unwrap();
    });

    TestServer {
        base: format!("http://{}", addr),
        chat_log,
        _temp: temp,
    }
}

async fn post_json(url: &str, body: Value) -> Value {
    reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_index_page() {
    let srv = start(None).await;

    let res = reqwest::get(format!("{}/", srv.base)).await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("Campus Assist"));
}

#[tokio::test]
async fn test_ask_place() {
    let srv = start(None).await;

    let body = post_json(&format!("{}/ask", srv.base), json!({ "q": "Where is the central library?" })).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["type"], "kb");
    assert_eq!(body["key"], "central library");
    assert!(body["answer"].as_str().unwrap().len() > 0);
    assert!(body.get("score").is_none());
}

#[tokio::test]
async fn test_chat_accepts_message_field() {
    let srv = start(None).await;

    let body = post_json(&format!("{}/chat", srv.base), json!({ "message": "list places" })).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["type"], "places");
    assert!(body["places"].as_array().unwrap().len() > 10);
}

#[tokio::test]
async fn test_ask_route_question() {
    let srv = start(None).await;

    let body = post_json(
        &format!("{}/ask", srv.base),
        json!({ "q": "How do I get to the gym from GJBC?" }),
    )
    .await;
    assert_eq!(body["type"], "directions");
    assert_eq!(body["key"], "pesu gym");
    assert_eq!(body["label"], "PESU Gym");
}

#[tokio::test]
async fn test_ask_empty_question() {
    let srv = start(None).await;

    for payload in [json!({ "q": "   " }), json!({})] {
        let body = post_json(&format!("{}/ask", srv.base), payload).await;
        assert_eq!(body, json!({ "ok": false, "answer": "Please ask a question." }));
    }
}

#[tokio::test]
async fn test_ask_unknown_falls_back() {
    let srv = start(None).await;

    let body = post_json(&format!("{}/ask", srv.base), json!({ "q": "qwxz" })).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["type"], "fallback");
    assert!(body["answer"].as_str().unwrap().starts_with("Sorry"));
}

#[tokio::test]
async fn test_places_sorted() {
    let srv = start(None).await;

    let places: Vec<String> = reqwest::get(format!("{}/places", srv.base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let mut sorted = places.clone();
    sorted.sort();
    assert_eq!(places, sorted);
    assert!(places.contains(&"central library".to_string()));
}

#[tokio::test]
async fn test_hotspots() {
    let srv = start(None).await;

    let spots: Vec<Value> = reqwest::get(format!("{}/hotspots", srv.base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(spots.len(), 9);
    for spot in &spots {
        let left = spot["left"].as_f64().unwrap();
        let top = spot["top"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&left));
        assert!((0.0..=100.0).contains(&top));
        assert!(spot["id"].is_string());
    }
}

#[tokio::test]
async fn test_map_missing_is_404() {
    let srv = start(None).await;

    for path in ["/map", "/map-image"] {
        let res = reqwest::get(format!("{}{}", srv.base, path)).await.unwrap();
        assert_eq!(res.status(), 404);
        assert_eq!(res.text().await.unwrap(), "Map image not found");
    }
}

#[tokio::test]
async fn test_map_served_with_content_type() {
    let dir = TempDir::new().unwrap();
    let map = dir.path().join("campus.png");
    std::fs::write(&map, b"\x89PNG\r\n\x1a\nfake").unwrap();

    let srv = start(Some(map)).await;

    let res = reqwest::get(format!("{}/map", srv.base)).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "image/png");
    assert_eq!(&res.bytes().await.unwrap()[..4], b"\x89PNG");
}

#[tokio::test]
async fn test_support_logs_exchange() {
    let srv = start(None).await;

    let body = post_json(
        &format!("{}/support", srv.base),
        json!({ "message": "I'm so stressed about exams" }),
    )
    .await;
    let answer = body["answer"].as_str().unwrap().to_string();
    assert!(!answer.is_empty());

    let entries = srv.chat_log.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user, "I'm so stressed about exams");
    assert_eq!(entries[0].bot, answer);
}

#[tokio::test]
async fn test_support_empty_message_not_logged() {
    let srv = start(None).await;

    let body = post_json(&format!("{}/support", srv.base), json!({ "message": "" })).await;
    assert!(body["answer"].is_string());
    assert!(srv.chat_log.entries().await.unwrap().is_empty());
}
