//! Authentication API integration tests
//!
//! Tests for registration, login, logout and user lookup.

use axum::http::StatusCode;
use dtalks::backend::auth::SessionKeys;
use dtalks::backend::store::DocumentStore;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::*;

#[tokio::test]
async fn test_register_returns_public_user() {
    let app = TestApp::new().await;

    let response = register(&app, "alice", "alice@example.com", TEST_PASSWORD).await;
    let body = assert_ok_json(&response);

    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["role"], "user");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts_regardless_of_username() {
    let app = TestApp::new().await;
    register(&app, "alice", "alice@example.com", TEST_PASSWORD).await;

    let response = register(&app, "someone-else", "alice@example.com", TEST_PASSWORD).await;

    assert_detail(
        &response,
        StatusCode::BAD_REQUEST,
        "User with this email or username already exists",
    );
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let app = TestApp::new().await;

    let response = register(&app, "alice", "not-an-email", TEST_PASSWORD).await;

    assert_detail(&response, StatusCode::BAD_REQUEST, "Invalid email format");
}

#[tokio::test]
async fn test_login_token_subject_is_user_id() {
    let app = TestApp::new().await;
    let registered: Value = register(&app, "alice", "alice@example.com", TEST_PASSWORD)
        .await
        .json();

    let response = login(&app, "alice@example.com", TEST_PASSWORD).await;
    let body = assert_ok_json(&response);

    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user"]["id"], registered["id"]);

    let token = body["access_token"].as_str().unwrap();
    let subject = SessionKeys::new(TEST_SECRET_KEY).verify_token(token).unwrap();
    assert_eq!(subject.to_string(), registered["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_login_marks_user_online_and_records_session() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "alice").await;

    let stored = app.store.find_user_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.is_online);

    let sessions = app.store.sessions_for(user.id).await;
    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].ended_at.is_none());
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    register(&app, "alice", "alice@example.com", TEST_PASSWORD).await;

    let wrong_password = login(&app, "alice@example.com", "nope").await;
    let unknown_email = login(&app, "nobody@example.com", TEST_PASSWORD).await;

    assert_detail(&wrong_password, StatusCode::UNAUTHORIZED, "Invalid credentials");
    assert_detail(&unknown_email, StatusCode::UNAUTHORIZED, "Invalid credentials");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new().await;

    let missing = app.server.get("/users/me").await;
    let garbage = app
        .server
        .get("/users/me")
        .authorization_bearer("not-a-token")
        .await;

    assert_detail(&missing, StatusCode::UNAUTHORIZED, "Not authenticated");
    assert_detail(&garbage, StatusCode::UNAUTHORIZED, "Invalid token");
}

#[tokio::test]
async fn test_me_returns_caller() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .get("/users/me")
        .authorization_bearer(&user.token)
        .await;
    let body = assert_ok_json(&response);

    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], user.email);
}

#[tokio::test]
async fn test_logout_ends_sessions_and_goes_offline() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "alice").await;

    let response = app
        .server
        .post("/auth/logout")
        .authorization_bearer(&user.token)
        .await;
    let body = assert_ok_json(&response);
    assert_eq!(body["message"], "Logged out successfully");

    let stored = app.store.find_user_by_id(user.id).await.unwrap().unwrap();
    assert!(!stored.is_online);
    assert!(app
        .store
        .sessions_for(user.id)
        .await
        .iter()
        .all(|s| s.ended_at.is_some()));

    // Tokens are not revoked by logout
    let me = app
        .server
        .get("/users/me")
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(me.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_search_users_matches_literally() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    create_test_user(&app, "bob").await;

    let found: Vec<Value> = app
        .server
        .get("/users")
        .add_query_param("search", "ali")
        .authorization_bearer(&alice.token)
        .await
        .json();
    let wildcard: Vec<Value> = app
        .server
        .get("/users")
        .add_query_param("search", "%")
        .authorization_bearer(&alice.token)
        .await
        .json();
    let everyone: Vec<Value> = app
        .server
        .get("/users")
        .authorization_bearer(&alice.token)
        .await
        .json();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["username"], "alice");
    assert!(wildcard.is_empty());
    assert_eq!(everyone.len(), 2);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;

    assert_eq!(assert_ok_json(&response)["status"], "ok");
}

#[tokio::test]
async fn test_login_missing_field_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/auth/login")
        .json(&serde_json::json!({ "email": "alice@example.com" }))
        .await;

    assert_detail_contains(&response, StatusCode::BAD_REQUEST, "missing field `password`");
}

#[tokio::test]
async fn test_register_missing_field_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/auth/register")
        .json(&serde_json::json!({ "username": "alice", "password": TEST_PASSWORD }))
        .await;

    assert_detail_contains(&response, StatusCode::BAD_REQUEST, "missing field `email`");
}
