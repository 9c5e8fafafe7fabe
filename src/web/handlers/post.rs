//! Post handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::store::{NewPost, PostUpdate};
use crate::web::dto::{
    ApiResponse, CreatePostRequest, PostResponse, UpdatePostRequest, ValidatedJson, VoteRequest,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /api/posts - List all posts, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts, newest first", body = Vec<PostResponse>)
    )
)]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PostResponse>>>, ApiError> {
    let store = state.store.lock().await;
    let responses = store
        .posts_newest_first()
        .iter()
        .map(|p| PostResponse::from_post(p, &store))
        .collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/posts - Create a post.
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponse>>), ApiError> {
    let mut store = state.store.lock().await;
    let post = store.create_post(NewPost {
        author_id: claims.sub,
        author_name: claims.name.clone(),
        title: req.title,
        content: req.content,
        attachment: req.attachment,
    });

    tracing::debug!(post_id = post.id, author_id = claims.sub, "Post created");

    let response = PostResponse::from_post(&post, &store);
    Ok((StatusCode::CREATED, Json(ApiResponse::new(response))))
}

/// PUT /api/posts/:post_id - Update a post (author only).
#[utoipa::path(
    put,
    path = "/api/posts/{post_id}",
    tag = "posts",
    params(
        ("post_id" = i64, Path, description = "Post ID")
    ),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let mut store = state.store.lock().await;

    let post = store.post(post_id)?;
    if post.author_id != claims.sub {
        return Err(ApiError::forbidden("You cannot edit this post"));
    }

    let post = store.update_post(
        post_id,
        PostUpdate {
            title: req.title,
            content: req.content,
            attachment: req.attachment,
        },
    )?;

    let response = PostResponse::from_post(&post, &store);
    Ok(Json(ApiResponse::new(response)))
}

/// DELETE /api/posts/:post_id - Delete a post (author or admin).
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    tag = "posts",
    params(
        ("post_id" = i64, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.lock().await;

    let post = store.post(post_id)?;
    if post.author_id != claims.sub && !claims.is_admin() {
        return Err(ApiError::forbidden("You cannot delete this post"));
    }

    store.delete_post(post_id)?;
    tracing::debug!(post_id, deleted_by = claims.sub, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/:post_id/vote - Toggle a like/dislike on a post.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/vote",
    tag = "posts",
    params(
        ("post_id" = i64, Path, description = "Post ID")
    ),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn vote_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let mut store = state.store.lock().await;
    let post = store.vote_post(post_id, claims.sub, req.vote)?;

    let response = PostResponse::from_post(&post, &store);
    Ok(Json(ApiResponse::new(response)))
}
