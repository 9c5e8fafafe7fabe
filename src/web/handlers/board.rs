//! Board handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::store::NewBoard;
use crate::web::dto::{
    ApiResponse, BoardResponse, CreateBoardRequest, UpdateBoardDescriptionRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /api/boards - List all boards.
#[utoipa::path(
    get,
    path = "/api/boards",
    tag = "boards",
    responses(
        (status = 200, description = "All boards", body = Vec<BoardResponse>)
    )
)]
pub async fn list_boards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BoardResponse>>>, ApiError> {
    let store = state.store.lock().await;
    let responses = store.boards().iter().map(BoardResponse::from_board).collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/boards - Create a board.
#[utoipa::path(
    post,
    path = "/api/boards",
    tag = "boards",
    request_body = CreateBoardRequest,
    responses(
        (status = 201, description = "Board created", body = BoardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_board(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BoardResponse>>), ApiError> {
    let mut store = state.store.lock().await;
    let board = store.create_board(NewBoard {
        name: req.name,
        description: req.description.unwrap_or_default(),
        created_by: claims.sub,
    });

    tracing::debug!(board_id = board.id, created_by = claims.sub, "Board created");

    let response = BoardResponse::from_board(&board);
    Ok((StatusCode::CREATED, Json(ApiResponse::new(response))))
}

/// PUT /api/boards/:board_id/description - Update a board's description (creator only).
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/description",
    tag = "boards",
    params(
        ("board_id" = i64, Path, description = "Board ID")
    ),
    request_body = UpdateBoardDescriptionRequest,
    responses(
        (status = 200, description = "Board updated", body = BoardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the creator"),
        (status = 404, description = "Board not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_board_description(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(board_id): Path<i64>,
    Json(req): Json<UpdateBoardDescriptionRequest>,
) -> Result<Json<ApiResponse<BoardResponse>>, ApiError> {
    let mut store = state.store.lock().await;

    let board = store.board(board_id)?;
    if board.created_by != claims.sub {
        return Err(ApiError::forbidden(
            "You cannot edit this board's description",
        ));
    }

    let board = store.update_board_description(board_id, &req.description)?;

    let response = BoardResponse::from_board(&board);
    Ok(Json(ApiResponse::new(response)))
}
