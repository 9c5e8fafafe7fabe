//! Test helpers for Web API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use serde_json::{json, Value};

use agora::chat::ChatManager;
use agora::store::DataStore;
use agora::web::handlers::AppState;
use agora::web::middleware::{JwtState, RateLimitState};
use agora::web::router::create_router;
use agora::SharedStore;

/// JWT secret used by all test servers.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Admin passkey configured on all test servers.
pub const TEST_ADMIN_PASSKEY: &str = "letmein-admin";

/// Create a test server with a fresh store and chat manager.
///
/// Rate limits are set high enough to never interfere with tests.
pub fn create_test_server() -> (TestServer, SharedStore, Arc<ChatManager>) {
    let store = DataStore::new().into_shared();
    let chat = Arc::new(ChatManager::new());

    let app_state = Arc::new(AppState::new(
        store.clone(),
        chat.clone(),
        TEST_JWT_SECRET,
        900,
        Some(TEST_ADMIN_PASSKEY.to_string()),
    ));
    let jwt_state = Arc::new(JwtState::new(TEST_JWT_SECRET));
    let rate_limit_state = Arc::new(RateLimitState::new(1000, 10000));

    let router = create_router(app_state, jwt_state, rate_limit_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, store, chat)
}

/// Register a user and return the response body.
pub async fn signup(server: &TestServer, username: &str, password: &str, name: &str) -> Value {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": username,
            "password": password,
            "name": name
        }))
        .await;

    response.json::<Value>()
}

/// Register an admin user using the test passkey.
pub async fn signup_admin(server: &TestServer, username: &str, password: &str, name: &str) -> Value {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": username,
            "password": password,
            "name": name,
            "admin": true,
            "admin_passkey": TEST_ADMIN_PASSKEY
        }))
        .await;

    response.json::<Value>()
}

/// Log in and return the access token.
pub async fn login_token(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["access_token"]
        .as_str()
        .expect("access_token in login response")
        .to_string()
}

/// Register a user, log them in, and return (token, user_id).
pub async fn register_and_login(
    server: &TestServer,
    username: &str,
    password: &str,
    name: &str,
) -> (String, i64) {
    let body = signup(server, username, password, name).await;
    let user_id = body["data"]["id"].as_i64().expect("user id in signup response");
    let token = login_token(server, username, password).await;
    (token, user_id)
}

/// Format a bearer authorization header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Create a post and return its ID.
pub async fn create_post(server: &TestServer, token: &str, title: &str, content: &str) -> i64 {
    let response = server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({
            "title": title,
            "content": content
        }))
        .await;

    let body: Value = response.json();
    body["data"]["id"].as_i64().expect("post id")
}
