//! Response DTOs for the Agora Web API.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Rank;
use crate::chat::ChatMessage;
use crate::store::{Board, Comment, DataStore, Post, User};

// ============================================================================
// Generic Response Wrapper
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Auth / User DTOs
// ============================================================================

/// Public user information.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Login username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// User role.
    pub role: String,
    /// Activity score.
    pub score: i64,
    /// Rank tier derived from the score.
    pub rank: String,
    /// Whether the account is suspended.
    pub suspended: bool,
}

impl UserInfo {
    /// Build the public view of a user.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            score: user.score,
            rank: Rank::from_score(user.score).as_str().to_string(),
            suspended: user.suspended,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// User information.
    pub user: UserInfo,
}

// ============================================================================
// Post / Comment DTOs
// ============================================================================

/// Author information attached to posts and comments.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorInfo {
    /// User ID.
    pub id: i64,
    /// Display name the content was written under.
    pub name: String,
    /// Author's current rank, absent when the account no longer exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
}

impl AuthorInfo {
    fn resolve(store: &DataStore, author_id: i64, author_name: &str) -> Self {
        Self {
            id: author_id,
            name: author_name.to_string(),
            rank: store
                .user(author_id)
                .map(|u| Rank::from_score(u.score).as_str().to_string()),
        }
    }
}

/// Serialize a vote tally map with string keys for JSON.
fn votes_map(votes: &HashMap<i64, crate::store::VoteKind>) -> HashMap<String, String> {
    votes
        .iter()
        .map(|(user_id, vote)| (user_id.to_string(), vote.as_str().to_string()))
        .collect()
}

/// Comment response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    /// Comment ID.
    pub id: i64,
    /// Parent post ID.
    pub post_id: i64,
    /// Author info.
    pub author: AuthorInfo,
    /// Comment body.
    pub content: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
    /// Number of likes.
    pub likes: usize,
    /// Number of dislikes.
    pub dislikes: usize,
    /// Per-user vote tally (user ID -> "like" | "dislike").
    pub votes: HashMap<String, String>,
}

impl CommentResponse {
    /// Build the response view of a comment.
    pub fn from_comment(comment: &Comment, store: &DataStore) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author: AuthorInfo::resolve(store, comment.author_id, &comment.author_name),
            content: comment.content.clone(),
            created_at: comment.created_at.to_rfc3339(),
            updated_at: comment.updated_at.to_rfc3339(),
            likes: comment.like_count(),
            dislikes: comment.dislike_count(),
            votes: votes_map(&comment.votes),
        }
    }
}

/// Post response with embedded comments.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    /// Post ID.
    pub id: i64,
    /// Author info.
    pub author: AuthorInfo,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Attachment path or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
    /// Number of likes.
    pub likes: usize,
    /// Number of dislikes.
    pub dislikes: usize,
    /// Per-user vote tally (user ID -> "like" | "dislike").
    pub votes: HashMap<String, String>,
    /// Comments, oldest first.
    pub comments: Vec<CommentResponse>,
}

impl PostResponse {
    /// Build the response view of a post.
    pub fn from_post(post: &Post, store: &DataStore) -> Self {
        Self {
            id: post.id,
            author: AuthorInfo::resolve(store, post.author_id, &post.author_name),
            title: post.title.clone(),
            content: post.content.clone(),
            attachment: post.attachment.clone(),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
            likes: post.like_count(),
            dislikes: post.dislike_count(),
            votes: votes_map(&post.votes),
            comments: post
                .comments
                .iter()
                .map(|c| CommentResponse::from_comment(c, store))
                .collect(),
        }
    }
}

// ============================================================================
// Board DTOs
// ============================================================================

/// Board response.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoardResponse {
    /// Board ID.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// User ID of the creator.
    pub created_by: i64,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl BoardResponse {
    /// Build the response view of a board.
    pub fn from_board(board: &Board) -> Self {
        Self {
            id: board.id,
            name: board.name.clone(),
            description: board.description.clone(),
            created_by: board.created_by,
            created_at: board.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Profile DTOs
// ============================================================================

/// A comment in a profile listing, annotated with its post title.
#[derive(Debug, Serialize)]
pub struct ProfileCommentResponse {
    /// The comment itself.
    #[serde(flatten)]
    pub comment: CommentResponse,
    /// Title of the post the comment belongs to.
    pub post_title: String,
}

/// Profile response: the caller's posts and comments.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Posts authored by the caller, newest first.
    pub posts: Vec<PostResponse>,
    /// Comments authored by the caller across all posts.
    pub comments: Vec<ProfileCommentResponse>,
}

// ============================================================================
// Admin DTOs
// ============================================================================

/// User entry in the admin user listing.
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    /// User ID.
    pub id: i64,
    /// Login username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// User role.
    pub role: String,
    /// Activity score.
    pub score: i64,
    /// Rank tier derived from the score.
    pub rank: String,
    /// Whether the account is suspended.
    pub suspended: bool,
    /// Number of posts authored.
    pub post_count: usize,
}

impl AdminUserResponse {
    /// Build the admin view of a user.
    pub fn from_user(user: &User, post_count: usize) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            score: user.score,
            rank: Rank::from_score(user.score).as_str().to_string(),
            suspended: user.suspended,
            post_count,
        }
    }
}

// ============================================================================
// Chat DTOs
// ============================================================================

/// A chat message in REST responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Sender's user ID.
    pub sender_id: i64,
    /// Sender's display name.
    pub sender_name: String,
    /// Message text.
    pub text: String,
    /// Timestamp (RFC 3339).
    pub timestamp: String,
}

impl MessageResponse {
    /// Build the response view of a chat message.
    pub fn from_message(message: &ChatMessage) -> Self {
        Self {
            sender_id: message.sender_id,
            sender_name: message.sender_name.clone(),
            text: message.text.clone(),
            timestamp: message.timestamp.to_rfc3339(),
        }
    }
}

/// The peer of a direct chat room.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatPeer {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// A direct chat room in the caller's room listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatRoomResponse {
    /// Room ID.
    pub id: i64,
    /// The user on the other side.
    pub other_user: ChatPeer,
    /// Most recent message, if any.
    pub last_message: Option<MessageResponse>,
}

/// Start-chat response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StartChatResponse {
    /// The direct room connecting the two users.
    pub room_id: i64,
}

/// Unread count response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    /// Total unread messages across the caller's rooms.
    pub unread_count: usize,
}
