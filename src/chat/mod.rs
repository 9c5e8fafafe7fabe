//! Realtime direct chat for Agora.
//!
//! Room state lives here; the WebSocket wire protocol is in `web::ws`.

mod manager;
mod room;

pub use manager::ChatManager;
pub use room::{ChatMessage, ChatRoom};
