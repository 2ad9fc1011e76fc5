//! Gateway integration tests
//!
//! Tests for channel tokens, typing indicators, online status and the
//! diagnostic endpoints, checked against the calls the mock gateway receives.

use axum::http::StatusCode;
use dtalks::backend::realtime::centrifugo::ChannelClaims;
use jsonwebtoken::{decode, DecodingKey, Validation};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

#[tokio::test]
async fn test_channel_token_is_signed_with_gateway_secret() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .server
        .get("/centrifugo/token")
        .authorization_bearer(&alice.token)
        .await;
    let body = assert_ok_json(&response);

    let token = body["token"].as_str().unwrap();
    let claims = decode::<ChannelClaims>(
        token,
        &DecodingKey::from_secret(TEST_GATEWAY_SECRET.as_bytes()),
        &Validation::default(),
    )
    .unwrap()
    .claims;

    assert_eq!(claims.sub, alice.id.to_string());
}

#[tokio::test]
async fn test_typing_publishes_indicator() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/typing")
        .authorization_bearer(&alice.token)
        .json(&json!({ "chat_id": "abc", "is_typing": true }))
        .await;
    assert_eq!(assert_ok_json(&response)["status"], "sent");

    let published = app.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0]["params"]["channel"], "chat-abc");
    assert_eq!(
        published[0]["params"]["data"],
        json!({
            "type": "typing_indicator",
            "user_id": alice.id.to_string(),
            "username": "alice",
            "is_typing": true,
        })
    );
}

#[tokio::test]
async fn test_typing_requires_chat_id() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/typing")
        .authorization_bearer(&alice.token)
        .json(&json!({ "chat_id": " ", "is_typing": true }))
        .await;

    assert_detail(&response, StatusCode::BAD_REQUEST, "Chat ID is required.");
}

#[tokio::test]
async fn test_online_status_broadcasts_once_to_every_chat() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;
    let with_bob = direct_chat(&app, &alice, &bob).await;
    let with_carol = direct_chat(&app, &alice, &carol).await;

    let response = app
        .server
        .post("/online-status")
        .authorization_bearer(&alice.token)
        .json(&json!({ "is_online": false }))
        .await;
    assert_eq!(assert_ok_json(&response)["status"], "updated");

    let broadcasts = app.gateway_calls("broadcast").await;
    assert_eq!(broadcasts.len(), 1);

    let mut channels: Vec<String> = broadcasts[0]["params"]["channels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap().to_string())
        .collect();
    channels.sort();
    let mut expected = vec![format!("chat-{}", with_bob), format!("chat-{}", with_carol)];
    expected.sort();
    assert_eq!(channels, expected);

    let data = &broadcasts[0]["params"]["data"];
    assert_eq!(data["type"], "online_status");
    assert_eq!(data["is_online"], false);
}

#[tokio::test]
async fn test_online_status_without_chats_skips_broadcast() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/online-status")
        .authorization_bearer(&alice.token)
        .json(&json!({ "is_online": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(app.gateway_calls("broadcast").await.is_empty());
}

#[tokio::test]
async fn test_debug_publish_reports_gateway_outcome() {
    let ok_app = TestApp::new().await;
    let alice = create_test_user(&ok_app, "alice").await;
    let ok: Value = ok_app
        .server
        .get("/debug/centrifugo-test")
        .authorization_bearer(&alice.token)
        .await
        .json();

    assert_eq!(ok["status"], "success");
    assert_eq!(ok["channel"], format!("test:{}", alice.id));
    assert_eq!(ok["data"]["type"], "test_message");

    let failing_app = TestApp::with_gateway_status(500).await;
    let bob = create_test_user(&failing_app, "bob").await;
    let failed: Value = failing_app
        .server
        .get("/debug/centrifugo-test")
        .authorization_bearer(&bob.token)
        .await
        .json();

    assert_eq!(failed["status"], "failed");
}

#[tokio::test]
async fn test_debug_online_lists_presence() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let body: Value = app
        .server
        .get("/debug/centrifugo-online/abc")
        .authorization_bearer(&alice.token)
        .await
        .json();

    assert_eq!(body, json!({ "chat_id": "abc", "online_users": [] }));
}

#[tokio::test]
async fn test_debug_token_names_caller() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let body: Value = app
        .server
        .get("/debug/centrifugo-token")
        .authorization_bearer(&alice.token)
        .await
        .json();

    assert_eq!(body["user_id"], alice.id.to_string());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_online_status_missing_flag_is_bad_request() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/online-status")
        .authorization_bearer(&alice.token)
        .json(&json!({ "username": "alice" }))
        .await;

    assert_detail_contains(&response, StatusCode::BAD_REQUEST, "missing field `is_online`");
    assert!(app.gateway_calls("broadcast").await.is_empty());
}
