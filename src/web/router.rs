//! Router configuration for the Agora Web API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    adjust_score, create_board, create_comment, create_post, delete_comment, delete_post,
    get_profile, list_boards, list_posts, list_rooms, list_users, login, me, signup, start_chat,
    toggle_suspend, unread_count, update_board_description, update_comment, update_post,
    update_profile, vote_comment, vote_post, AppState,
};
use super::middleware::{
    api_rate_limit, create_cors_layer, jwt_auth, login_rate_limit, JwtState, RateLimitState,
};
use super::openapi::ApiDoc;
use super::ws::chat_ws_handler;

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    rate_limit_state: Arc<RateLimitState>,
    cors_origins: &[String],
) -> Router {
    // Credential endpoints carry the stricter login rate limit
    let login_limiter = rate_limit_state.clone();
    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .layer(middleware::from_fn(move |req, next| {
            let state = login_limiter.clone();
            login_rate_limit(state, req, next)
        }))
        .route("/me", get(me));

    let post_routes = Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:post_id", put(update_post).delete(delete_post))
        .route("/:post_id/vote", post(vote_post))
        .route("/:post_id/comments", post(create_comment))
        .route(
            "/:post_id/comments/:comment_id",
            put(update_comment).delete(delete_comment),
        )
        .route("/:post_id/comments/:comment_id/vote", post(vote_comment));

    let board_routes = Router::new()
        .route("/", get(list_boards).post(create_board))
        .route("/:board_id/description", put(update_board_description));

    let profile_routes = Router::new().route("/me", get(get_profile).put(update_profile));

    let admin_routes = Router::new()
        .route("/users", get(list_users))
        .route("/users/:user_id/toggle-suspend", post(toggle_suspend))
        .route("/users/:user_id/adjust-score", post(adjust_score));

    let chat_routes = Router::new()
        .route("/start", post(start_chat))
        .route("/rooms", get(list_rooms))
        .route("/unread-count", get(unread_count))
        .route("/ws", get(chat_ws_handler));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/posts", post_routes)
        .nest("/boards", board_routes)
        .nest("/profile", profile_routes)
        .nest("/admin", admin_routes)
        .nest("/chat", chat_routes);

    let jwt_state_for_middleware = jwt_state.clone();
    let api_limiter = rate_limit_state.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = api_limiter.clone();
                    api_rate_limit(state, req, next)
                }))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
