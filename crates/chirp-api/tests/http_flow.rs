//! Drives the full router in-process: register, login, then the message
//! lifecycle, checking status codes and bodies at each step.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use chirp_api::AppStateInner;
use chirp_api::router;
use chirp_db::Database;

fn app() -> Router {
    router::build(AppStateInner::new(Database::open_in_memory().unwrap()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn register(app: &Router, username: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/register",
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn end_to_end_account_and_message_lifecycle() {
    let app = app();

    let alice = register(&app, "alice", "password1").await;
    assert_eq!(alice["username"], "alice");
    let alice_id = alice["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/register",
        Some(json!({ "username": "alice", "password": "different" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        Some(json!({ "username": "alice", "password": "password1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let logged_in: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(logged_in, alice);

    let (status, body) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({ "postedBy": alice_id, "messageText": "hello", "timePosted": 1669947792000_i64 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created: Value = serde_json::from_str(&body).unwrap();
    let message_id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/messages/{message_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(fetched["messageText"], "hello");
    assert_eq!(fetched["postedBy"], alice_id);

    let (status, body) = send(&app, "DELETE", &format!("/messages/{message_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1");

    let (status, body) = send(&app, "DELETE", &format!("/messages/{message_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn invalid_registration_is_bad_request() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/register",
        Some(json!({ "username": "", "password": "password1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/register",
        Some(json!({ "username": "bob", "password": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let app = app();
    register(&app, "alice", "password1").await;

    for (username, password) in [("alice", "password2"), ("alicf", "password1")] {
        let (status, _) = send(
            &app,
            "POST",
            "/login",
            Some(json!({ "username": username, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn invalid_messages_are_bad_request() {
    let app = app();
    let alice_id = register(&app, "alice", "password1").await["id"]
        .as_i64()
        .unwrap();

    for body in [
        json!({ "postedBy": alice_id, "messageText": "   " }),
        json!({ "postedBy": alice_id, "messageText": "a".repeat(256) }),
        json!({ "postedBy": alice_id + 1, "messageText": "hello" }),
    ] {
        let (status, _) = send(&app, "POST", "/messages", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({ "postedBy": alice_id, "messageText": "a".repeat(255) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_message_is_empty_ok() {
    let app = app();
    let (status, body) = send(&app, "GET", "/messages/404", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn patch_updates_text() {
    let app = app();
    let alice_id = register(&app, "alice", "password1").await["id"]
        .as_i64()
        .unwrap();
    let (_, body) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({ "postedBy": alice_id, "messageText": "draft" })),
    )
    .await;
    let message_id = serde_json::from_str::<Value>(&body).unwrap()["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/messages/{message_id}");

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "messageText": "final" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1");

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["messageText"], "final");

    let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "messageText": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PATCH",
        "/messages/9999",
        Some(json!({ "messageText": "valid" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listings() {
    let app = app();
    let alice_id = register(&app, "alice", "password1").await["id"]
        .as_i64()
        .unwrap();
    let bob_id = register(&app, "bob", "password1").await["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");

    for text in ["one", "two"] {
        send(
            &app,
            "POST",
            "/messages",
            Some(json!({ "postedBy": alice_id, "messageText": text })),
        )
        .await;
    }

    let (_, body) = send(&app, "GET", "/messages", None).await;
    assert_eq!(serde_json::from_str::<Vec<Value>>(&body).unwrap().len(), 2);

    let (_, body) = send(&app, "GET", &format!("/accounts/{alice_id}/messages"), None).await;
    let mine: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0]["messageText"], "one");

    let (status, body) = send(&app, "GET", &format!("/accounts/{bob_id}/messages"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn health_check() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn null_fields_are_bad_request() {
    let app = app();
    let alice_id = register(&app, "alice", "password1").await["id"]
        .as_i64()
        .unwrap();
    let (_, body) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({ "postedBy": alice_id, "messageText": "draft" })),
    )
    .await;
    let message_id = serde_json::from_str::<Value>(&body).unwrap()["id"]
        .as_i64()
        .unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({ "postedBy": alice_id, "messageText": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/messages/{message_id}"),
        Some(json!({ "messageText": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/register",
        Some(json!({ "username": null, "password": "password1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreadable_bodies_are_bad_request() {
    let app = app();

    let request = Request::builder()
        .method("PATCH")
        .uri("/messages/1")
        .body(Body::from(r#"{"messageText":"hello"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
