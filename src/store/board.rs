//! Board model and board operations on the data store.

use chrono::{DateTime, Utc};

use super::DataStore;
use crate::{AgoraError, Result};

/// A discussion board.
#[derive(Debug, Clone)]
pub struct Board {
    /// Unique board ID.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// User ID of the creator.
    pub created_by: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new board.
#[derive(Debug, Clone)]
pub struct NewBoard {
    /// Board name.
    pub name: String,
    /// Board description (may be empty).
    pub description: String,
    /// User ID of the creator.
    pub created_by: i64,
}

impl DataStore {
    /// Create a new board.
    pub fn create_board(&mut self, new: NewBoard) -> Board {
        let board = Board {
            id: self.allocate_board_id(),
            name: new.name,
            description: new.description,
            created_by: new.created_by,
            created_at: Utc::now(),
        };
        self.boards.push(board.clone());
        board
    }

    /// All boards, in creation order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Look up a board by ID.
    pub fn board(&self, id: i64) -> Result<&Board> {
        self.boards
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AgoraError::NotFound("board".to_string()))
    }

    /// Replace a board's description.
    pub fn update_board_description(&mut self, id: i64, description: &str) -> Result<Board> {
        let board = self
            .boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AgoraError::NotFound("board".to_string()))?;
        board.description = description.to_string();
        Ok(board.clone())
    }
}
