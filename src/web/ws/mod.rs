//! WebSocket support for the Agora Web API.

mod chat;
mod messages;

pub use chat::chat_ws_handler;
pub use messages::{ClientMessage, MessagePayload, ServerMessage};
