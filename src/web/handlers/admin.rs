//! Admin panel handlers.
//!
//! All routes require a token carrying the admin role.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{AdjustScoreRequest, AdminUserResponse, ApiResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AdminUser;

/// GET /api/admin/users - All users with their post counts.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
) -> Result<Json<ApiResponse<Vec<AdminUserResponse>>>, ApiError> {
    let store = state.store.lock().await;
    let responses = store
        .users()
        .iter()
        .map(|u| AdminUserResponse::from_user(u, store.post_count_by_author(u.id)))
        .collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/admin/users/:id/toggle-suspend - Suspend or unsuspend a user.
pub async fn toggle_suspend(
    State(state): State<Arc<AppState>>,
    AdminUser(claims): AdminUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<AdminUserResponse>>, ApiError> {
    if claims.sub == user_id {
        return Err(ApiError::bad_request("Admins cannot suspend themselves"));
    }

    let mut store = state.store.lock().await;
    let user = store.toggle_user_suspended(user_id)?;

    tracing::info!(
        user_id = user.id,
        suspended = user.suspended,
        admin_id = claims.sub,
        "User suspension toggled"
    );

    let post_count = store.post_count_by_author(user.id);
    Ok(Json(ApiResponse::new(AdminUserResponse::from_user(
        &user, post_count,
    ))))
}

/// POST /api/admin/users/:id/adjust-score - Set a user's score.
pub async fn adjust_score(
    State(state): State<Arc<AppState>>,
    AdminUser(claims): AdminUser,
    Path(user_id): Path<i64>,
    Json(req): Json<AdjustScoreRequest>,
) -> Result<Json<ApiResponse<AdminUserResponse>>, ApiError> {
    let mut store = state.store.lock().await;
    let user = store.set_user_score(user_id, req.score)?;

    tracing::info!(
        user_id = user.id,
        score = user.score,
        admin_id = claims.sub,
        "User score adjusted"
    );

    let post_count = store.post_count_by_author(user.id);
    Ok(Json(ApiResponse::new(AdminUserResponse::from_user(
        &user, post_count,
    ))))
}
