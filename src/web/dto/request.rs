//! Request DTOs for the Agora Web API.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::store::VoteKind;

use super::validation::{no_control_chars, not_empty_trimmed};

/// User signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Login username.
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    #[validate(custom(function = no_control_chars))]
    pub username: String,
    /// Password (validated against the password policy separately).
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    #[validate(custom(function = no_control_chars))]
    pub name: String,
    /// Request an admin account.
    #[serde(default)]
    pub admin: bool,
    /// Passkey for admin registration.
    #[serde(default)]
    pub admin_passkey: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Post creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    /// Post title.
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    #[validate(custom(function = not_empty_trimmed))]
    #[validate(custom(function = no_control_chars))]
    pub title: String,
    /// Post body.
    #[validate(length(max = 20000, message = "Content must be at most 20000 characters"))]
    #[validate(custom(function = not_empty_trimmed))]
    pub content: String,
    /// Optional attachment path or URL, recorded verbatim.
    #[serde(default)]
    pub attachment: Option<String>,
}

/// Post update request. Same shape as creation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    /// New title.
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    #[validate(custom(function = not_empty_trimmed))]
    #[validate(custom(function = no_control_chars))]
    pub title: String,
    /// New body.
    #[validate(length(max = 20000, message = "Content must be at most 20000 characters"))]
    #[validate(custom(function = not_empty_trimmed))]
    pub content: String,
    /// New attachment path or URL.
    #[serde(default)]
    pub attachment: Option<String>,
}

/// Vote request for posts and comments.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VoteRequest {
    /// The vote to toggle.
    #[schema(value_type = String, example = "like")]
    pub vote: VoteKind,
}

/// Comment creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    /// Comment body.
    #[validate(length(max = 2000, message = "Content must be at most 2000 characters"))]
    #[validate(custom(function = not_empty_trimmed))]
    pub content: String,
}

/// Comment update request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    /// New comment body.
    #[validate(length(max = 2000, message = "Content must be at most 2000 characters"))]
    #[validate(custom(function = not_empty_trimmed))]
    pub content: String,
}

/// Board creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBoardRequest {
    /// Board name.
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    #[validate(custom(function = not_empty_trimmed))]
    #[validate(custom(function = no_control_chars))]
    pub name: String,
    /// Board description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Board description update request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBoardDescriptionRequest {
    /// New description.
    #[serde(default)]
    pub description: String,
}

/// Profile update request.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    /// Current password, verified before any change is applied.
    pub current_password: String,
    /// New display name (unchanged when absent).
    #[serde(default)]
    pub new_name: Option<String>,
    /// New password (unchanged when absent).
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Admin score adjustment request.
#[derive(Debug, Deserialize)]
pub struct AdjustScoreRequest {
    /// Absolute score to set.
    pub score: i64,
}

/// Start-chat request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StartChatRequest {
    /// The peer to open a direct room with.
    pub user_id: i64,
}
