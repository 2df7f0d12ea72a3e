//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    domain::RoomTarget,
    infrastructure::dto::http::{ErrorDto, RoomUsersDto},
    ui::state::AppState,
    usecase::GetRoomUsersError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `GET /` redirects, `GET /{room_id}` lists the joined members.
pub async fn room_query(state: Arc<AppState>, path: &str) -> Response {
    match RoomTarget::from_path(path) {
        RoomTarget::Create => redirect_top(&state.top_redirect),
        RoomTarget::Attach(room_id) => {
            match state
                .get_room_users_usecase
                .execute(room_id.into_string())
                .await
            {
                Ok(users) => Json(RoomUsersDto {
                    users: users.into_iter().map(|id| id.into_string()).collect(),
                })
                .into_response(),
                Err(GetRoomUsersError::RoomNotFound) => not_found(),
            }
        }
        RoomTarget::Invalid => not_found(),
    }
}

fn redirect_top(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
        format!("See: {location}"),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorDto {
            error: "404 not found".to_string(),
        }),
    )
        .into_response()
}
