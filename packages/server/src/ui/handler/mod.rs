//! Request handlers.
//!
//! Every path goes through [`entry`]: WebSocket upgrades become sessions,
//! plain GETs are answered by the HTTP handlers.

pub mod http;
pub mod websocket;

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::Uri,
    response::Response,
};

use super::state::AppState;

pub use http::health_check;

/// `GET` handler for every path not routed explicitly.
pub async fn entry(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Response {
    match ws {
        Ok(ws) => websocket::websocket_handler(ws, state, uri.path()),
        Err(_) => http::room_query(state, uri.path()).await,
    }
}
