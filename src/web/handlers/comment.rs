//! Comment handlers.
//!
//! Comments are nested under posts; every route takes the parent post ID.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::store::NewComment;
use crate::web::dto::{
    ApiResponse, CommentResponse, CreateCommentRequest, UpdateCommentRequest, ValidatedJson,
    VoteRequest,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/posts/:post_id/comments - Add a comment to a post.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comments",
    tag = "comments",
    params(
        ("post_id" = i64, Path, description = "Parent post ID")
    ),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponse>>), ApiError> {
    let mut store = state.store.lock().await;
    let comment = store.add_comment(
        post_id,
        NewComment {
            author_id: claims.sub,
            author_name: claims.name.clone(),
            content: req.content,
        },
    )?;

    let response = CommentResponse::from_comment(&comment, &store);
    Ok((StatusCode::CREATED, Json(ApiResponse::new(response))))
}

/// PUT /api/posts/:post_id/comments/:comment_id - Update a comment (author or admin).
#[utoipa::path(
    put,
    path = "/api/posts/{post_id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("post_id" = i64, Path, description = "Parent post ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post or comment not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<UpdateCommentRequest>,
) -> Result<Json<ApiResponse<CommentResponse>>, ApiError> {
    let mut store = state.store.lock().await;

    let comment = store
        .post(post_id)?
        .comment(comment_id)
        .ok_or_else(|| ApiError::not_found("comment not found"))?;
    if comment.author_id != claims.sub && !claims.is_admin() {
        return Err(ApiError::forbidden("You cannot edit this comment"));
    }

    let comment = store.update_comment(post_id, comment_id, &req.content)?;

    let response = CommentResponse::from_comment(&comment, &store);
    Ok(Json(ApiResponse::new(response)))
}

/// DELETE /api/posts/:post_id/comments/:comment_id - Delete a comment (author or admin).
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("post_id" = i64, Path, description = "Parent post ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post or comment not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.lock().await;

    let comment = store
        .post(post_id)?
        .comment(comment_id)
        .ok_or_else(|| ApiError::not_found("comment not found"))?;
    if comment.author_id != claims.sub && !claims.is_admin() {
        return Err(ApiError::forbidden("You cannot delete this comment"));
    }

    store.delete_comment(post_id, comment_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/:post_id/comments/:comment_id/vote - Toggle a like/dislike on a comment.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comments/{comment_id}/vote",
    tag = "comments",
    params(
        ("post_id" = i64, Path, description = "Parent post ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post or comment not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn vote_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<ApiResponse<CommentResponse>>, ApiError> {
    let mut store = state.store.lock().await;
    let comment = store.vote_comment(post_id, comment_id, claims.sub, req.vote)?;

    let response = CommentResponse::from_comment(&comment, &store);
    Ok(Json(ApiResponse::new(response)))
}
