//! WebSocket message types for the chat protocol.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Messages sent from client to server.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Join a chat room. The caller must be a participant.
    #[serde(rename = "joinRoom")]
    JoinRoom {
        /// Room ID to join.
        room_id: i64,
    },
    /// Send a chat message to the joined room.
    #[serde(rename = "chatMessage")]
    ChatMessage {
        /// Room ID the message targets.
        room_id: i64,
        /// Message text.
        text: String,
    },
    /// Heartbeat ping.
    #[serde(rename = "ping")]
    Ping,
}

/// A chat message as delivered to one recipient.
///
/// `is_mine` is computed per recipient, so the same broadcast message
/// serializes differently on each side of the room.
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    /// Sender's user ID.
    pub sender_id: i64,
    /// Sender's display name.
    pub sender_name: String,
    /// Message text.
    pub text: String,
    /// ISO 8601 timestamp.
    pub timestamp: String,
    /// Whether the recipient wrote this message.
    pub is_mine: bool,
}

impl MessagePayload {
    /// Render a stored message for a specific recipient.
    pub fn for_recipient(message: &ChatMessage, recipient_id: i64) -> Self {
        Self {
            sender_id: message.sender_id,
            sender_name: message.sender_name.clone(),
            text: message.text.clone(),
            timestamp: message.timestamp.to_rfc3339(),
            is_mine: message.sender_id == recipient_id,
        }
    }
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// A chat message.
    #[serde(rename = "message")]
    Message(MessagePayload),
    /// Successfully joined a room; carries the full history.
    #[serde(rename = "joined")]
    Joined {
        /// Room ID.
        room_id: i64,
        /// Message history, oldest first.
        messages: Vec<MessagePayload>,
    },
    /// Error message.
    #[serde(rename = "error")]
    Error {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
    },
    /// Heartbeat pong response.
    #[serde(rename = "pong")]
    Pong,
}

impl ServerMessage {
    /// Create an error message.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}
