//! In-memory data store for Agora.
//!
//! The store keeps users, boards and posts (with embedded comments) in plain
//! vectors guarded by a single async mutex, with monotonic ID counters.
//! There is no persistence; the process owns the only copy of the data.

mod board;
mod post;
mod user;

pub use board::{Board, NewBoard};
pub use post::{Comment, NewComment, NewPost, Post, PostUpdate, VoteKind};
pub use user::{NewUser, Role, User};

use std::sync::Arc;

use tokio::sync::Mutex;

/// The shared, mutable application data.
#[derive(Debug)]
pub struct DataStore {
    pub(crate) users: Vec<User>,
    pub(crate) posts: Vec<Post>,
    pub(crate) boards: Vec<Board>,
    next_user_id: i64,
    next_post_id: i64,
    next_comment_id: i64,
    next_board_id: i64,
}

/// Thread-safe handle to the data store shared across handlers.
pub type SharedStore = Arc<Mutex<DataStore>>;

impl DataStore {
    /// Create an empty data store.
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            posts: Vec::new(),
            boards: Vec::new(),
            next_user_id: 1,
            next_post_id: 1,
            next_comment_id: 1,
            next_board_id: 1,
        }
    }

    /// Wrap the store in a shared handle.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub(crate) fn allocate_user_id(&mut self) -> i64 {
        let id = self.next_user_id;
        self.next_user_id += 1;
        id
    }

    pub(crate) fn allocate_post_id(&mut self) -> i64 {
        let id = self.next_post_id;
        self.next_post_id += 1;
        id
    }

    pub(crate) fn allocate_comment_id(&mut self) -> i64 {
        let id = self.next_comment_id;
        self.next_comment_id += 1;
        id
    }

    pub(crate) fn allocate_board_id(&mut self) -> i64 {
        let id = self.next_board_id;
        self.next_board_id += 1;
        id
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
