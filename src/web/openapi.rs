//! OpenAPI documentation for the forum and chat REST surface.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::web::dto::{
    AuthorInfo, BoardResponse, ChatPeer, ChatRoomResponse, CommentResponse, CreateBoardRequest,
    CreateCommentRequest, CreatePostRequest, MessageResponse, PostResponse, StartChatRequest,
    StartChatResponse, UnreadCountResponse, UpdateBoardDescriptionRequest, UpdateCommentRequest,
    UpdatePostRequest, UserInfo, VoteRequest,
};

/// OpenAPI document for the Agora Web API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::handlers::post::list_posts,
        crate::web::handlers::post::create_post,
        crate::web::handlers::post::update_post,
        crate::web::handlers::post::delete_post,
        crate::web::handlers::post::vote_post,
        crate::web::handlers::comment::create_comment,
        crate::web::handlers::comment::update_comment,
        crate::web::handlers::comment::delete_comment,
        crate::web::handlers::comment::vote_comment,
        crate::web::handlers::board::list_boards,
        crate::web::handlers::board::create_board,
        crate::web::handlers::board::update_board_description,
        crate::web::handlers::chat::start_chat,
        crate::web::handlers::chat::list_rooms,
        crate::web::handlers::chat::unread_count,
    ),
    components(schemas(
        CreatePostRequest,
        UpdatePostRequest,
        VoteRequest,
        CreateCommentRequest,
        UpdateCommentRequest,
        CreateBoardRequest,
        UpdateBoardDescriptionRequest,
        StartChatRequest,
        PostResponse,
        CommentResponse,
        AuthorInfo,
        BoardResponse,
        ChatRoomResponse,
        ChatPeer,
        MessageResponse,
        StartChatResponse,
        UnreadCountResponse,
        UserInfo,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "posts", description = "Post operations"),
        (name = "comments", description = "Comment operations"),
        (name = "boards", description = "Board operations"),
        (name = "chat", description = "Direct chat operations"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
