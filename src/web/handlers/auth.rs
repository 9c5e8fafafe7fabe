//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::store::{NewUser, Role};
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, SignupRequest, UserInfo, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/auth/signup - Register a new account.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), ApiError> {
    // Admin registration is gated by the configured passkey
    let role = if req.admin {
        match (&state.admin_passkey, req.admin_passkey.as_deref()) {
            (Some(expected), Some(provided)) if expected == provided => Role::Admin,
            (None, _) => return Err(ApiError::forbidden("Admin registration is disabled")),
            _ => return Err(ApiError::forbidden("Invalid admin passkey")),
        }
    } else {
        Role::User
    };

    crate::auth::validate_password(&req.password)
        .map_err(|e| ApiError::unprocessable(format!("Password error: {}", e)))?;

    let password_hash = crate::auth::hash_password(&req.password)
        .map_err(|_| ApiError::internal("Failed to hash password"))?;

    let user = {
        let mut store = state.store.lock().await;
        store.create_user(NewUser::new(&req.username, password_hash, &req.name).with_role(role))?
    };

    tracing::info!(user_id = user.id, username = %user.username, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(UserInfo::from_user(&user))),
    ))
}

/// POST /api/auth/login - User login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    // Uniform error for unknown user and wrong password
    let user = {
        let store = state.store.lock().await;
        store
            .user_by_username(&req.username)
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?
    };

    crate::auth::verify_password(&req.password, &user.password)
        .map_err(|_| ApiError::unauthorized("Invalid username or password"))?;

    if user.suspended {
        return Err(ApiError::forbidden("Account is suspended"));
    }

    let access_token = state.generate_access_token(&user)?;

    tracing::debug!(user_id = user.id, "User logged in");

    let response = LoginResponse {
        access_token,
        expires_in: state.access_token_expiry,
        user: UserInfo::from_user(&user),
    };

    Ok(Json(ApiResponse::new(response)))
}

/// GET /api/auth/me - Get current user info.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let store = state.store.lock().await;
    let user = store
        .user(claims.sub)
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(UserInfo::from_user(user))))
}
