//! Message API integration tests
//!
//! Tests for sending messages over every transport, attachments, paging and
//! advisory real-time delivery.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use dtalks::backend::chat::MAX_FILE_SIZE;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::*;

fn file_form(chat_id: &str, message_type: &str, size: usize) -> MultipartForm {
    MultipartForm::new()
        .add_text("chat_id", chat_id.to_string())
        .add_text("message_type", message_type.to_string())
        .add_part(
            "file",
            Part::bytes(vec![7u8; size])
                .file_name("report.bin")
                .mime_type("application/octet-stream"),
        )
}

#[tokio::test]
async fn test_send_text_message() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let response = send_text(&app, &alice, &chat_id, "hello").await;
    let body = assert_ok_json(&response);

    assert_eq!(body["chat_id"], chat_id);
    assert_eq!(body["content"], "hello");
    assert_eq!(body["sender_id"], alice.id.to_string());
    assert_eq!(body["sender_username"], "alice");
    assert_eq!(body["message_type"], "text");
    assert!(body["file_path"].is_null());
}

#[tokio::test]
async fn test_sent_message_is_published_to_chat_channel() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let message: Value = send_text(&app, &alice, &chat_id, "hello").await.json();

    let published = app.published().await;
    assert_eq!(published.len(), 1);

    let params = &published[0]["params"];
    assert_eq!(params["channel"], format!("chat-{}", chat_id));
    assert_eq!(params["data"]["type"], "new_message");
    assert_eq!(params["data"]["chat_id"], chat_id);
    assert_eq!(params["data"]["sender_id"], alice.id.to_string());
    assert_eq!(params["data"]["message"], message);
}

#[tokio::test]
async fn test_publish_failure_does_not_change_result() {
    let app = TestApp::with_gateway_status(503).await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let response = send_text(&app, &alice, &chat_id, "still stored").await;
    let sent = assert_ok_json(&response);

    let history: Vec<Value> = app
        .server
        .get(&format!("/chats/{}/messages", chat_id))
        .authorization_bearer(&bob.token)
        .await
        .json();
    assert_eq!(history, vec![sent]);
    assert_eq!(app.published().await.len(), 1);
}

#[tokio::test]
async fn test_send_requires_chat_id() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/messages")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "where to?" }))
        .await;

    assert_detail(&response, StatusCode::BAD_REQUEST, "Chat ID is required.");
}

#[tokio::test]
async fn test_send_to_foreign_chat_matches_missing_chat() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let mallory = create_test_user(&app, "mallory").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let foreign = send_text(&app, &mallory, &chat_id, "hi").await;
    let missing = send_text(&app, &mallory, &Uuid::new_v4().to_string(), "hi").await;

    assert_detail(&foreign, StatusCode::NOT_FOUND, "Chat not found or access denied");
    assert_detail(&missing, StatusCode::NOT_FOUND, "Chat not found or access denied");
    assert!(app.published().await.is_empty());
}

#[tokio::test]
async fn test_send_url_encoded_form() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let response = app
        .server
        .post("/messages")
        .authorization_bearer(&alice.token)
        .form(&json!({ "chat_id": chat_id, "content": "from a form" }))
        .await;
    let body = assert_ok_json(&response);

    assert_eq!(body["content"], "from a form");
}

#[tokio::test]
async fn test_file_of_exactly_max_size_is_accepted() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let response = app
        .server
        .post("/messages")
        .authorization_bearer(&alice.token)
        .multipart(file_form(&chat_id, "file", MAX_FILE_SIZE))
        .await;
    let body = assert_ok_json(&response);

    assert_eq!(body["message_type"], "file");
    assert_eq!(body["file_name"], "report.bin");
    assert_eq!(body["file_size"], MAX_FILE_SIZE as u64);
    assert_eq!(body["file_type"], "application/octet-stream");

    let file_path = body["file_path"].as_str().unwrap();
    let stored_name = file_path.rsplit('/').next().unwrap();
    assert!(stored_name.ends_with(".bin"));
    let stored = std::fs::metadata(app.uploads.path().join(stored_name)).unwrap();
    assert_eq!(stored.len(), MAX_FILE_SIZE as u64);
}

#[tokio::test]
async fn test_file_over_max_size_is_rejected() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let response = app
        .server
        .post("/messages")
        .authorization_bearer(&alice.token)
        .multipart(file_form(&chat_id, "file", MAX_FILE_SIZE + 1))
        .await;

    assert_detail(
        &response,
        StatusCode::PAYLOAD_TOO_LARGE,
        "File size too large. Maximum size is 10MB.",
    );
    assert_eq!(std::fs::read_dir(app.uploads.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_file_ignored_for_text_messages() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let response = app
        .server
        .post("/messages")
        .authorization_bearer(&alice.token)
        .multipart(file_form(&chat_id, "text", 16))
        .await;
    let body = assert_ok_json(&response);

    assert!(body["file_path"].is_null());
    assert_eq!(std::fs::read_dir(app.uploads.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_message_pages_are_chronological() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    for content in ["M1", "M2", "M3"] {
        send_text(&app, &alice, &chat_id, content).await;
    }

    let page = |number: i64| {
        app.server
            .get(&format!("/chats/{}/messages", chat_id))
            .add_query_param("page", number)
            .add_query_param("limit", 2)
            .authorization_bearer(&bob.token)
    };

    let newest: Vec<Value> = page(1).await.json();
    let older: Vec<Value> = page(2).await.json();

    let contents = |messages: &[Value]| -> Vec<String> {
        messages
            .iter()
            .map(|m| m["content"].as_str().unwrap_or_default().to_string())
            .collect()
    };
    assert_eq!(contents(&newest), vec!["M2", "M3"]);
    assert_eq!(contents(&older), vec!["M1"]);
}

#[tokio::test]
async fn test_unknown_message_type_is_rejected() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let response = app
        .server
        .post("/messages")
        .authorization_bearer(&alice.token)
        .json(&json!({ "chat_id": chat_id, "content": "x", "message_type": "video" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
