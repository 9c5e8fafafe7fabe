//! Agora - a small community forum server.
//!
//! Signup/login, boards, posts with comments and votes, a score/rank system,
//! an admin panel and realtime direct chat over WebSockets. All data lives in
//! an in-memory store; nothing survives a restart.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, PasswordError, Rank, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use chat::{ChatManager, ChatMessage, ChatRoom};
pub use config::Config;
pub use error::{AgoraError, Result};
pub use store::{DataStore, NewBoard, NewComment, NewPost, NewUser, Role, SharedStore, VoteKind};
pub use web::WebServer;
