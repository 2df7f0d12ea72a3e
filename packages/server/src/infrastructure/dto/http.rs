//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /{room_id}` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomUsersDto {
    pub users: Vec<String>,
}

/// Error body for HTTP responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
