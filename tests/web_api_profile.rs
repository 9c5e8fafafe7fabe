//! Web API tests for the profile endpoints.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{bearer, create_post, create_test_server, login_token, register_and_login};

#[tokio::test]
async fn test_profile_lists_own_posts_and_comments() {
    let (server, _store, _chat) = create_test_server();
    let (alice, _) = register_and_login(&server, "alice", "password123", "Alice").await;
    let (bob, _) = register_and_login(&server, "bob", "password123", "Bob").await;

    let alice_post = create_post(&server, &alice, "Alice's post", "body").await;
    let bob_post = create_post(&server, &bob, "Bob's post", "body").await;

    // Alice comments on Bob's post
    server
        .post(&format!("/api/posts/{bob_post}/comments"))
        .add_header(AUTHORIZATION, bearer(&alice))
        .json(&json!({"content": "Hi Bob"}))
        .await;

    let response = server
        .get("/api/profile/me")
        .add_header(AUTHORIZATION, bearer(&alice))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let posts = body["data"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], alice_post);

    let comments = body["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "Hi Bob");
    // The parent post title is attached for context
    assert_eq!(comments[0]["post_title"], "Bob's post");
}

#[tokio::test]
async fn test_profile_requires_auth() {
    let (server, _store, _chat) = create_test_server();

    let response = server.get("/api/profile/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile_name() {
    let (server, _store, _chat) = create_test_server();
    let (alice, _) = register_and_login(&server, "alice", "password123", "Alice").await;

    let response = server
        .put("/api/profile/me")
        .add_header(AUTHORIZATION, bearer(&alice))
        .json(&json!({
            "current_password": "password123",
            "new_name": "Alicia"
        }))
        .await;
    response.assert_status_ok();

    let me: Value = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, bearer(&alice))
        .await
        .json();
    assert_eq!(me["data"]["name"], "Alicia");
}

#[tokio::test]
async fn test_update_profile_password() {
    let (server, _store, _chat) = create_test_server();
    let (alice, _) = register_and_login(&server, "alice", "password123", "Alice").await;

    let response = server
        .put("/api/profile/me")
        .add_header(AUTHORIZATION, bearer(&alice))
        .json(&json!({
            "current_password": "password123",
            "new_password": "even-better-password"
        }))
        .await;
    response.assert_status_ok();

    // Old password no longer works
    let response = server
        .post("/api/auth/login")
        .json(&json!({"username": "alice", "password": "password123"}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // New one does
    let token = login_token(&server, "alice", "even-better-password").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_update_profile_wrong_current_password() {
    let (server, _store, _chat) = create_test_server();
    let (alice, _) = register_and_login(&server, "alice", "password123", "Alice").await;

    let response = server
        .put("/api/profile/me")
        .add_header(AUTHORIZATION, bearer(&alice))
        .json(&json!({
            "current_password": "not-my-password",
            "new_name": "Mallory"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    // Nothing changed
    let me: Value = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, bearer(&alice))
        .await
        .json();
    assert_eq!(me["data"]["name"], "Alice");
}

#[tokio::test]
async fn test_update_profile_weak_new_password_rejected() {
    let (server, _store, _chat) = create_test_server();
    let (alice, _) = register_and_login(&server, "alice", "password123", "Alice").await;

    let response = server
        .put("/api/profile/me")
        .add_header(AUTHORIZATION, bearer(&alice))
        .json(&json!({
            "current_password": "password123",
            "new_password": "short"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
