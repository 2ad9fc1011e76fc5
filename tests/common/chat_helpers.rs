//! Chat test helpers

use axum_test::TestResponse;
use serde_json::{json, Value};

use super::app::TestApp;
use super::auth_helpers::TestUser;

/// POST /chats as `user`
pub async fn post_chat(app: &TestApp, user: &TestUser, chat_type: &str, participants: &[String]) -> TestResponse {
    app.server
        .post("/chats")
        .authorization_bearer(&user.token)
        .json(&json!({
            "chat_type": chat_type,
            "participants": participants,
        }))
        .await
}

/// Direct chat between two users, returning its id
pub async fn direct_chat(app: &TestApp, a: &TestUser, b: &TestUser) -> String {
    let body: Value = post_chat(app, a, "direct", &[a.id.to_string(), b.id.to_string()])
        .await
        .json();
    body["id"].as_str().expect("Chat response has no id").to_string()
}

/// Send a text message with a JSON body
pub async fn send_text(app: &TestApp, user: &TestUser, chat_id: &str, content: &str) -> TestResponse {
    app.server
        .post("/messages")
        .authorization_bearer(&user.token)
        .json(&json!({ "chat_id": chat_id, "content": content }))
        .await
}
