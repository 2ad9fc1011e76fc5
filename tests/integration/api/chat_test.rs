//! Chat API integration tests
//!
//! Tests for chat creation, direct-chat reuse, listing and visibility.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use uuid::Uuid;

use crate::common::*;

#[tokio::test]
async fn test_direct_chat_is_reused_for_same_pair() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    let first = direct_chat(&app, &alice, &bob).await;
    let second = direct_chat(&app, &alice, &bob).await;
    let from_bob = direct_chat(&app, &bob, &alice).await;

    assert_eq!(first, second);
    assert_eq!(first, from_bob);

    let listed: Vec<Value> = app
        .server
        .get("/chats")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_group_chats_are_never_reused() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let members = [bob.id.to_string()];

    let first: Value = post_chat(&app, &alice, "group", &members).await.json();
    let second: Value = post_chat(&app, &alice, "group", &members).await.json();

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_creator_is_added_to_participants() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    let response = post_chat(&app, &alice, "group", &[bob.id.to_string()]).await;
    let body = assert_ok_json(&response);

    assert_eq!(
        body["participants"],
        serde_json::json!([bob.id.to_string(), alice.id.to_string()])
    );
    assert_eq!(body["created_by"], alice.id.to_string());
    assert_eq!(body["chat_type"], "group");
    assert!(body["last_message"].is_null());
}

#[tokio::test]
async fn test_participant_usernames_format_skips_unknown_ids() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let ghost = Uuid::new_v4();

    let response = post_chat(
        &app,
        &alice,
        "group",
        &[bob.id.to_string(), ghost.to_string()],
    )
    .await;
    let body = assert_ok_json(&response);

    assert_eq!(body["participants"].as_array().unwrap().len(), 3);
    assert_eq!(
        body["participant_usernames"],
        serde_json::json!([
            format!("{}||||bob", bob.id),
            format!("{}||||alice", alice.id),
        ])
    );
}

#[tokio::test]
async fn test_malformed_participant_is_rejected() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = post_chat(&app, &alice, "group", &["not-an-id".to_string()]).await;

    assert_detail(
        &response,
        StatusCode::BAD_REQUEST,
        "Invalid participant id: not-an-id",
    );
}

#[tokio::test]
async fn test_get_chat_includes_last_message() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    send_text(&app, &alice, &chat_id, "first").await;
    send_text(&app, &bob, &chat_id, "second").await;

    let response = app
        .server
        .get(&format!("/chats/{}", chat_id))
        .authorization_bearer(&alice.token)
        .await;
    let body = assert_ok_json(&response);

    assert_eq!(body["id"], chat_id);
    assert_eq!(body["last_message"]["content"], "second");
    assert_eq!(body["last_message"]["sender_username"], "bob");
}

#[tokio::test]
async fn test_foreign_chat_is_indistinguishable_from_missing() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let mallory = create_test_user(&app, "mallory").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    for id in [chat_id, Uuid::new_v4().to_string(), "garbage".to_string()] {
        let response = app
            .server
            .get(&format!("/chats/{}", id))
            .authorization_bearer(&mallory.token)
            .await;
        assert_detail(&response, StatusCode::NOT_FOUND, "Chat not found");

        let history = app
            .server
            .get(&format!("/chats/{}/messages", id))
            .authorization_bearer(&mallory.token)
            .await;
        assert_detail(
            &history,
            StatusCode::NOT_FOUND,
            "Chat not found or access denied",
        );
    }
}

#[tokio::test]
async fn test_list_chats_only_shows_own_chats() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;

    direct_chat(&app, &alice, &bob).await;
    direct_chat(&app, &bob, &carol).await;

    let alice_chats: Vec<Value> = app
        .server
        .get("/chats")
        .authorization_bearer(&alice.token)
        .await
        .json();
    let bob_chats: Vec<Value> = app
        .server
        .get("/chats")
        .authorization_bearer(&bob.token)
        .await
        .json();

    assert_eq!(alice_chats.len(), 1);
    assert_eq!(bob_chats.len(), 2);
}

#[tokio::test]
async fn test_chats_require_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/chats").await;

    assert_detail(&response, StatusCode::UNAUTHORIZED, "Not authenticated");
}

#[tokio::test]
async fn test_create_chat_missing_type_is_bad_request() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/chats")
        .authorization_bearer(&alice.token)
        .json(&serde_json::json!({ "participants": [] }))
        .await;

    assert_detail_contains(&response, StatusCode::BAD_REQUEST, "missing field `chat_type`");
}

#[tokio::test]
async fn test_bad_page_number_is_bad_request() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let chat_id = direct_chat(&app, &alice, &bob).await;

    let response = app
        .server
        .get(&format!("/chats/{}/messages", chat_id))
        .add_query_param("page", "first")
        .authorization_bearer(&alice.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["detail"].is_string());
}

#[tokio::test]
async fn test_list_chats_newest_first_with_last_message() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;

    let older = direct_chat(&app, &alice, &bob).await;
    let newer = direct_chat(&app, &alice, &carol).await;
    send_text(&app, &alice, &older, "in the older chat").await;

    let listed: Vec<Value> = app
        .server
        .get("/chats")
        .authorization_bearer(&alice.token)
        .await
        .json();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], newer);
    assert!(listed[0]["last_message"].is_null());
    assert_eq!(listed[1]["id"], older);
    assert_eq!(listed[1]["last_message"]["content"], "in the older chat");
}
