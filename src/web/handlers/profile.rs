//! Profile handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::web::dto::{
    ApiResponse, CommentResponse, PostResponse, ProfileCommentResponse, ProfileResponse,
    UpdateProfileRequest,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /api/profile/me - The caller's posts and comments.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let store = state.store.lock().await;

    let posts = store
        .posts_by_author(claims.sub)
        .iter()
        .map(|p| PostResponse::from_post(p, &store))
        .collect();

    let comments = store
        .comments_by_author(claims.sub)
        .iter()
        .map(|(comment, post_title)| ProfileCommentResponse {
            comment: CommentResponse::from_comment(comment, &store),
            post_title: post_title.clone(),
        })
        .collect();

    Ok(Json(ApiResponse::new(ProfileResponse { posts, comments })))
}

/// PUT /api/profile/me - Update display name and/or password.
///
/// The current password must verify before any change is applied.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let user = {
        let store = state.store.lock().await;
        store
            .user(claims.sub)
            .cloned()
            .ok_or_else(|| ApiError::not_found("User not found"))?
    };

    crate::auth::verify_password(&req.current_password, &user.password)
        .map_err(|_| ApiError::unauthorized("Current password does not match"))?;

    // Hash outside the store lock; Argon2 is deliberately slow
    let new_password_hash = match &req.new_password {
        Some(new_password) => {
            crate::auth::validate_password(new_password)
                .map_err(|e| ApiError::unprocessable(format!("Password error: {}", e)))?;
            Some(
                crate::auth::hash_password(new_password)
                    .map_err(|_| ApiError::internal("Failed to hash password"))?,
            )
        }
        None => None,
    };

    {
        let mut store = state.store.lock().await;
        if let Some(new_name) = &req.new_name {
            if new_name.trim().is_empty() {
                return Err(ApiError::unprocessable("Name must not be empty"));
            }
            store.update_user_name(claims.sub, new_name)?;
        }
        if let Some(hash) = new_password_hash {
            store.update_user_password(claims.sub, &hash)?;
        }
    }

    tracing::debug!(user_id = claims.sub, "Profile updated");

    Ok(Json(ApiResponse::new(())))
}
