//! Chat REST handlers.
//!
//! Room membership, unread counts and room listings. The realtime protocol
//! itself lives in `web::ws`.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::web::dto::{
    ApiResponse, ChatPeer, ChatRoomResponse, MessageResponse, StartChatRequest, StartChatResponse,
    UnreadCountResponse,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/chat/start - Open (or find) the direct room with another user.
#[utoipa::path(
    post,
    path = "/api/chat/start",
    tag = "chat",
    request_body = StartChatRequest,
    responses(
        (status = 200, description = "Existing room", body = StartChatResponse),
        (status = 201, description = "Room created", body = StartChatResponse),
        (status = 400, description = "Cannot chat with yourself"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Peer not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn start_chat(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<StartChatRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StartChatResponse>>), ApiError> {
    if req.user_id == claims.sub {
        return Err(ApiError::bad_request("You cannot chat with yourself"));
    }

    {
        let store = state.store.lock().await;
        if store.user(req.user_id).is_none() {
            return Err(ApiError::not_found("User not found"));
        }
    }

    let (room, created) = state.chat.open_direct_room(claims.sub, req.user_id).await;

    if created {
        tracing::debug!(room_id = room.id(), a = claims.sub, b = req.user_id, "Chat room created");
    }

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(ApiResponse::new(StartChatResponse { room_id: room.id() })),
    ))
}

/// GET /api/chat/rooms - The caller's rooms with peers and last messages.
#[utoipa::path(
    get,
    path = "/api/chat/rooms",
    tag = "chat",
    responses(
        (status = 200, description = "The caller's chat rooms", body = Vec<ChatRoomResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<ChatRoomResponse>>>, ApiError> {
    let rooms = state.chat.rooms_for_user(claims.sub).await;

    let store = state.store.lock().await;
    let mut responses = Vec::with_capacity(rooms.len());
    for room in rooms {
        // Rooms whose peer no longer exists are silently skipped
        let Some(peer_id) = room.other_participant(claims.sub) else {
            continue;
        };
        let Some(peer) = store.user(peer_id) else {
            continue;
        };

        responses.push(ChatRoomResponse {
            id: room.id(),
            other_user: ChatPeer {
                id: peer.id,
                name: peer.name.clone(),
            },
            last_message: room.last_message().await.map(|m| MessageResponse::from_message(&m)),
        });
    }

    Ok(Json(ApiResponse::new(responses)))
}

/// GET /api/chat/unread-count - Total unread messages for the caller.
#[utoipa::path(
    get,
    path = "/api/chat/unread-count",
    tag = "chat",
    responses(
        (status = 200, description = "Total unread messages", body = UnreadCountResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<UnreadCountResponse>>, ApiError> {
    let unread_count = state.chat.total_unread_for(claims.sub).await;

    Ok(Json(ApiResponse::new(UnreadCountResponse { unread_count })))
}
