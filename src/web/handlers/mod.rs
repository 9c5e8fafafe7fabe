//! Request handlers for the Agora Web API.

pub mod admin;
pub mod auth;
pub mod board;
pub mod chat;
pub mod comment;
pub mod post;
pub mod profile;

pub use admin::{adjust_score, list_users, toggle_suspend};
pub use auth::{login, me, signup};
pub use board::{create_board, list_boards, update_board_description};
pub use chat::{list_rooms, start_chat, unread_count};
pub use comment::{create_comment, delete_comment, update_comment, vote_comment};
pub use post::{create_post, delete_post, list_posts, update_post, vote_post};
pub use profile::{get_profile, update_profile};

use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use crate::chat::ChatManager;
use crate::store::{SharedStore, User};
use crate::web::error::ApiError;
use crate::web::middleware::JwtClaims;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory data store.
    pub store: SharedStore,
    /// Chat room manager.
    pub chat: Arc<ChatManager>,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
    /// Passkey required for admin signup; None disables admin signup.
    pub admin_passkey: Option<String>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        store: SharedStore,
        chat: Arc<ChatManager>,
        jwt_secret: &str,
        access_token_expiry: u64,
        admin_passkey: Option<String>,
    ) -> Self {
        Self {
            store,
            chat,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry,
            admin_passkey: admin_passkey.filter(|p| !p.is_empty()),
        }
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(&self, user: &User) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }
}
