//! Chat room manager for Agora.
//!
//! Centralized registry of direct chat rooms. There is at most one room per
//! unordered user pair; lookups and creation go through the manager so every
//! socket and handler shares the same room instances.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::room::ChatRoom;

/// Manager for direct chat rooms.
///
/// Shared across all connections and request handlers.
pub struct ChatManager {
    /// Rooms indexed by ID.
    rooms: RwLock<HashMap<i64, Arc<ChatRoom>>>,
    /// Next room ID, guarded by the same lock discipline as the map.
    next_room_id: RwLock<i64>,
}

impl ChatManager {
    /// Create a new, empty chat manager.
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            next_room_id: RwLock::new(1),
        }
    }

    /// Find the direct room between two users, or create it.
    ///
    /// Returns the room and whether it was newly created.
    pub async fn open_direct_room(&self, user_a: i64, user_b: i64) -> (Arc<ChatRoom>, bool) {
        let mut rooms = self.rooms.write().await;

        if let Some(existing) = rooms.values().find(|r| r.connects(user_a, user_b)) {
            return (Arc::clone(existing), false);
        }

        let id = {
            let mut next = self.next_room_id.write().await;
            let id = *next;
            *next += 1;
            id
        };

        let room = Arc::new(ChatRoom::new(id, user_a, user_b));
        rooms.insert(id, Arc::clone(&room));
        (room, true)
    }

    /// Get a room by ID.
    pub async fn room(&self, id: i64) -> Option<Arc<ChatRoom>> {
        self.rooms.read().await.get(&id).cloned()
    }

    /// All rooms the given user participates in, ordered by room ID.
    pub async fn rooms_for_user(&self, user_id: i64) -> Vec<Arc<ChatRoom>> {
        let rooms = self.rooms.read().await;
        let mut result: Vec<Arc<ChatRoom>> = rooms
            .values()
            .filter(|r| r.is_participant(user_id))
            .cloned()
            .collect();
        result.sort_by_key(|r| r.id());
        result
    }

    /// Total unread messages for a user across all their rooms.
    pub async fn total_unread_for(&self, user_id: i64) -> usize {
        let rooms = self.rooms_for_user(user_id).await;
        let mut total = 0;
        for room in rooms {
            total += room.unread_count_for(user_id).await;
        }
        total
    }

    /// Number of rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl Default for ChatManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manager_new() {
        let manager = ChatManager::new();
        assert_eq!(manager.room_count().await, 0);
    }

    #[tokio::test]
    async fn test_open_direct_room_creates_once() {
        let manager = ChatManager::new();

        let (room, created) = manager.open_direct_room(1, 2).await;
        assert!(created);
        assert_eq!(room.id(), 1);
        assert_eq!(manager.room_count().await, 1);

        // Same pair, either order, reuses the room
        let (again, created) = manager.open_direct_room(2, 1).await;
        assert!(!created);
        assert_eq!(again.id(), room.id());
        assert_eq!(manager.room_count().await, 1);
    }

    #[tokio::test]
    async fn test_open_direct_room_distinct_pairs() {
        let manager = ChatManager::new();
        let (r1, _) = manager.open_direct_room(1, 2).await;
        let (r2, _) = manager.open_direct_room(1, 3).await;
        assert_ne!(r1.id(), r2.id());
        assert_eq!(manager.room_count().await, 2);
    }

    #[tokio::test]
    async fn test_room_lookup() {
        let manager = ChatManager::new();
        let (room, _) = manager.open_direct_room(1, 2).await;

        assert!(manager.room(room.id()).await.is_some());
        assert!(manager.room(999).await.is_none());
    }

    #[tokio::test]
    async fn test_rooms_for_user() {
        let manager = ChatManager::new();
        manager.open_direct_room(1, 2).await;
        manager.open_direct_room(1, 3).await;
        manager.open_direct_room(2, 3).await;

        let rooms = manager.rooms_for_user(1).await;
        assert_eq!(rooms.len(), 2);
        // Ordered by room ID
        assert!(rooms[0].id() < rooms[1].id());

        assert_eq!(manager.rooms_for_user(4).await.len(), 0);
    }

    #[tokio::test]
    async fn test_total_unread() {
        let manager = ChatManager::new();
        let (r1, _) = manager.open_direct_room(1, 2).await;
        let (r2, _) = manager.open_direct_room(1, 3).await;

        r1.send_message(2, "Bob", "hey").await;
        r2.send_message(3, "Carol", "hi").await;
        r2.send_message(3, "Carol", "you there?").await;

        assert_eq!(manager.total_unread_for(1).await, 3);
        assert_eq!(manager.total_unread_for(2).await, 0);
        assert_eq!(manager.total_unread_for(3).await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_open_direct_room() {
        let manager = Arc::new(ChatManager::new());

        let m1 = Arc::clone(&manager);
        let m2 = Arc::clone(&manager);
        let h1 = tokio::spawn(async move { m1.open_direct_room(1, 2).await.0.id() });
        let h2 = tokio::spawn(async move { m2.open_direct_room(2, 1).await.0.id() });

        let (id1, id2) = (h1.await.unwrap(), h2.await.unwrap());
        assert_eq!(id1, id2);
        assert_eq!(manager.room_count().await, 1);
    }
}
