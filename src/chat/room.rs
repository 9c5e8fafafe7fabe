//! Direct chat room implementation for Agora.
//!
//! A room connects exactly two users. Messages are kept in an append-only,
//! timestamp-ordered list; connected sockets receive new messages through a
//! tokio broadcast channel. Each participant carries a last-read mark that
//! drives the unread counts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, RwLock};

/// Maximum number of messages to buffer in the broadcast channel.
const CHANNEL_CAPACITY: usize = 100;

/// A chat message.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Sender's user ID.
    pub sender_id: i64,
    /// Sender's display name.
    pub sender_name: String,
    /// Message text.
    pub text: String,
    /// Timestamp when the message was sent.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new chat message stamped with the current time.
    pub fn new(sender_id: i64, sender_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender_id,
            sender_name: sender_name.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A direct chat room between two users.
pub struct ChatRoom {
    /// Room ID.
    id: i64,
    /// The two participants. Fixed at creation.
    user_ids: [i64; 2],
    /// Creation timestamp.
    created_at: DateTime<Utc>,
    /// Last-read mark per participant.
    last_read: RwLock<HashMap<i64, DateTime<Utc>>>,
    /// Ordered message log.
    messages: RwLock<Vec<ChatMessage>>,
    /// Broadcast sender for connected sockets.
    sender: broadcast::Sender<ChatMessage>,
}

impl ChatRoom {
    /// Create a new room between two users.
    ///
    /// Both last-read marks start at the creation time, so the room begins
    /// with no unread messages for either side.
    pub fn new(id: i64, user_a: i64, user_b: i64) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        let created_at = Utc::now();
        let mut last_read = HashMap::new();
        last_read.insert(user_a, created_at);
        last_read.insert(user_b, created_at);

        Self {
            id,
            user_ids: [user_a, user_b],
            created_at,
            last_read: RwLock::new(last_read),
            messages: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Get the room ID.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Get the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check if a user is a participant of this room.
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.user_ids.contains(&user_id)
    }

    /// Check if this room connects exactly the given pair of users.
    pub fn connects(&self, user_a: i64, user_b: i64) -> bool {
        self.is_participant(user_a) && self.is_participant(user_b) && user_a != user_b
    }

    /// The participant on the other side of the given user.
    pub fn other_participant(&self, user_id: i64) -> Option<i64> {
        if !self.is_participant(user_id) {
            return None;
        }
        self.user_ids.iter().copied().find(|id| *id != user_id)
    }

    /// Get a receiver for messages broadcast to this room.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.sender.subscribe()
    }

    /// Append a message and broadcast it to subscribed sockets.
    ///
    /// The sender's last-read mark advances to the message timestamp; you do
    /// not have unread messages you just wrote. Returns the stored message.
    pub async fn send_message(
        &self,
        sender_id: i64,
        sender_name: &str,
        text: impl Into<String>,
    ) -> ChatMessage {
        let message = ChatMessage::new(sender_id, sender_name, text);

        self.messages.write().await.push(message.clone());
        self.last_read
            .write()
            .await
            .insert(sender_id, message.timestamp);

        // Receiver count may be zero when nobody is connected
        let _ = self.sender.send(message.clone());
        message
    }

    /// The full message history, oldest first.
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    /// The most recent message, if any.
    pub async fn last_message(&self) -> Option<ChatMessage> {
        self.messages.read().await.last().cloned()
    }

    /// Number of messages in the room.
    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Advance a participant's last-read mark to now.
    pub async fn mark_read(&self, user_id: i64) {
        if self.is_participant(user_id) {
            self.last_read.write().await.insert(user_id, Utc::now());
        }
    }

    /// Number of messages newer than the user's last-read mark that were
    /// sent by the other side.
    pub async fn unread_count_for(&self, user_id: i64) -> usize {
        let last_read = match self.last_read.read().await.get(&user_id).copied() {
            Some(ts) => ts,
            None => return 0,
        };

        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.timestamp > last_read && m.sender_id != user_id)
            .count()
    }
}
