//! Chat WebSocket handler.
//!
//! Authenticates the JWT at upgrade time, then runs a per-connection loop
//! between the client socket and the joined room's broadcast channel. The
//! `is_mine` flag is stamped per recipient as messages are forwarded.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::chat::{ChatMessage, ChatRoom};
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

use super::messages::{ClientMessage, MessagePayload, ServerMessage};

/// GET /api/chat/ws?token={jwt} - WebSocket chat endpoint.
///
/// The token is passed as a query parameter because browsers cannot set
/// headers on WebSocket requests. Invalid tokens are rejected before the
/// upgrade.
pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Response {
    tracing::info!(
        user_id = claims.sub,
        username = %claims.username,
        "WebSocket connection accepted"
    );

    ws.on_upgrade(move |socket| handle_socket(socket, state, claims.sub, claims.name))
}

/// Handle a WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user_id: i64, user_name: String) {
    let session_id = format!("ws-{}-{}", user_id, uuid::Uuid::new_v4());
    tracing::debug!(session = %session_id, "WebSocket session started");

    let (mut ws_sender, mut ws_receiver) = socket.split();

    // The room this socket has joined, if any
    let mut current_room: Option<Arc<ChatRoom>> = None;
    let mut room_receiver: Option<broadcast::Receiver<ChatMessage>> = None;

    loop {
        tokio::select! {
            // Incoming WebSocket frames
            Some(msg_result) = ws_receiver.next() => {
                match msg_result {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => {
                                handle_client_message(
                                    &mut ws_sender,
                                    &state,
                                    user_id,
                                    &user_name,
                                    client_msg,
                                    &mut current_room,
                                    &mut room_receiver,
                                ).await;
                            }
                            Err(e) => {
                                tracing::debug!("Failed to parse client message: {}", e);
                                send(&mut ws_sender, &ServerMessage::error(
                                    "invalid_message",
                                    "Invalid message format",
                                )).await;
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!(session = %session_id, "WebSocket closed by client");
                        break;
                    }
                    Ok(Message::Ping(data)) => {
                        let _ = ws_sender.send(Message::Pong(data)).await;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!(session = %session_id, "WebSocket error: {}", e);
                        break;
                    }
                }
            }

            // Messages broadcast to the joined room
            msg = async {
                if let Some(ref mut receiver) = room_receiver {
                    receiver.recv().await.ok()
                } else {
                    // No room joined yet; park until the other branch fires
                    std::future::pending::<Option<ChatMessage>>().await
                }
            } => {
                if let Some(chat_msg) = msg {
                    // The user is looking at this room, so everything up to
                    // here counts as read
                    if let Some(ref room) = current_room {
                        room.mark_read(user_id).await;
                    }

                    let payload = MessagePayload::for_recipient(&chat_msg, user_id);
                    if !try_send(&mut ws_sender, &ServerMessage::Message(payload)).await {
                        break;
                    }
                }
            }
        }
    }

    tracing::debug!(session = %session_id, "WebSocket session ended");
}

/// Handle a parsed client message.
async fn handle_client_message(
    ws_sender: &mut SplitSink<WebSocket, Message>,
    state: &AppState,
    user_id: i64,
    user_name: &str,
    msg: ClientMessage,
    current_room: &mut Option<Arc<ChatRoom>>,
    room_receiver: &mut Option<broadcast::Receiver<ChatMessage>>,
) {
    match msg {
        ClientMessage::JoinRoom { room_id } => {
            let room = match state.chat.room(room_id).await {
                Some(room) => room,
                None => {
                    send(ws_sender, &ServerMessage::error("room_not_found", "Room not found"))
                        .await;
                    return;
                }
            };

            if !room.is_participant(user_id) {
                send(
                    ws_sender,
                    &ServerMessage::error("not_a_participant", "You are not in this room"),
                )
                .await;
                return;
            }

            // Subscribe before reading history so nothing is missed between
            // the snapshot and the first recv
            *room_receiver = Some(room.subscribe());
            room.mark_read(user_id).await;

            let messages = room
                .history()
                .await
                .iter()
                .map(|m| MessagePayload::for_recipient(m, user_id))
                .collect();

            send(ws_sender, &ServerMessage::Joined { room_id, messages }).await;

            *current_room = Some(room);
        }

        ClientMessage::ChatMessage { room_id, text } => {
            let room = match current_room {
                Some(room) if room.id() == room_id => room,
                _ => {
                    send(
                        ws_sender,
                        &ServerMessage::error("not_in_room", "Join the room first"),
                    )
                    .await;
                    return;
                }
            };

            if text.trim().is_empty() {
                send(
                    ws_sender,
                    &ServerMessage::error("empty_message", "Message text is empty"),
                )
                .await;
                return;
            }

            // Delivery to this socket happens through the broadcast channel,
            // sender included
            room.send_message(user_id, user_name, text).await;
        }

        ClientMessage::Ping => {
            send(ws_sender, &ServerMessage::Pong).await;
        }
    }
}

/// Serialize and send a server message, ignoring send failures.
async fn send(ws_sender: &mut SplitSink<WebSocket, Message>, msg: &ServerMessage) {
    let _ = try_send(ws_sender, msg).await;
}

/// Serialize and send a server message; returns false when the socket is gone.
async fn try_send(ws_sender: &mut SplitSink<WebSocket, Message>, msg: &ServerMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => ws_sender.send(Message::Text(json)).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize server message: {}", e);
            true
        }
    }
}
