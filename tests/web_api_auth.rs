//! Web API authentication tests.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{bearer, create_test_server, login_token, signup, TEST_ADMIN_PASSKEY};

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn test_signup_success() {
    let (server, _store, _chat) = create_test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "password": "password123",
            "name": "Alice"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["score"], 0);
    assert_eq!(body["data"]["rank"], "Rookie");
    assert_eq!(body["data"]["suspended"], false);
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let (server, _store, _chat) = create_test_server();
    signup(&server, "alice", "password123", "Alice").await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "password": "password456",
            "name": "Another Alice"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_duplicate_username_case_insensitive() {
    let (server, _store, _chat) = create_test_server();
    signup(&server, "alice", "password123", "Alice").await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "ALICE",
            "password": "password456",
            "name": "Shouty Alice"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_short_password() {
    let (server, _store, _chat) = create_test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "password": "short",
            "name": "Alice"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let (server, _store, _chat) = create_test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_invalid_username_rejected() {
    let (server, _store, _chat) = create_test_server();

    // Too short per the validation rules
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "al",
            "password": "password123",
            "name": "Alice"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert!(body["error"]["details"]["username"].is_array());
}

// ============================================================================
// Admin signup
// ============================================================================

#[tokio::test]
async fn test_signup_admin_with_passkey() {
    let (server, _store, _chat) = create_test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "root",
            "password": "password123",
            "name": "Root",
            "admin": true,
            "admin_passkey": TEST_ADMIN_PASSKEY
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_signup_admin_wrong_passkey() {
    let (server, _store, _chat) = create_test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "root",
            "password": "password123",
            "name": "Root",
            "admin": true,
            "admin_passkey": "wrong"
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_signup_admin_missing_passkey() {
    let (server, _store, _chat) = create_test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "root",
            "password": "password123",
            "name": "Root",
            "admin": true
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let (server, _store, _chat) = create_test_server();
    signup(&server, "alice", "password123", "Alice").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": "alice",
            "password": "password123"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"]["access_token"].is_string());
    assert_eq!(body["data"]["expires_in"], 900);
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert_eq!(body["data"]["user"]["rank"], "Rookie");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _store, _chat) = create_test_server();
    signup(&server, "alice", "password123", "Alice").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": "alice",
            "password": "wrong-password"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user_same_error() {
    let (server, _store, _chat) = create_test_server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": "nobody",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    // Same message as wrong password; no username probing
    assert_eq!(body["error"]["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_empty_fields() {
    let (server, _store, _chat) = create_test_server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": "",
            "password": ""
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Me
// ============================================================================

#[tokio::test]
async fn test_me_with_valid_token() {
    let (server, _store, _chat) = create_test_server();
    signup(&server, "alice", "password123", "Alice").await;
    let token = login_token(&server, "alice", "password123").await;

    let response = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["score"], 0);
}

#[tokio::test]
async fn test_me_without_token() {
    let (server, _store, _chat) = create_test_server();

    let response = server.get("/api/auth/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_invalid_token() {
    let (server, _store, _chat) = create_test_server();

    let response = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, "Bearer invalid-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
