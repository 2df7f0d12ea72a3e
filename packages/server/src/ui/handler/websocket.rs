//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::Response,
};
use futures_util::{
    sink::SinkExt,
    stream::{BoxStream, SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{OutboundFrame, RoomTarget},
    infrastructure::dto::websocket::PING,
    ui::{
        session::{InboundFrame, run_session},
        state::AppState,
    },
};

/// Upgrade the request and hand the socket to a session.
///
/// The room is resolved after the upgrade, so an unknown room id is answered
/// by closing the socket rather than by an HTTP error.
pub fn websocket_handler(ws: WebSocketUpgrade, state: Arc<AppState>, path: &str) -> Response {
    let target = RoomTarget::from_path(path);
    tracing::debug!("WebSocket upgrade on '{}' ({:?})", path, target);
    ws.on_upgrade(move |socket| handle_socket(socket, state, target))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// This is the only writer of the socket: relayed messages from other
/// connections, heartbeat pings and the final close all go through it.
///
/// # Arguments
///
/// * `rx` - Channel receiver for frames addressed to this connection
/// * `sender` - WebSocket sink of this connection
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundFrame>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let message = match frame {
                OutboundFrame::Text(json) => Message::Text(json.into()),
                OutboundFrame::Ping => Message::Text(PING.into()),
                OutboundFrame::Close => break,
            };
            if sender.send(message).await.is_err() {
                return;
            }
        }
        // Channel closed or close requested
        let _ = sender.send(Message::Close(None)).await;
        let _ = sender.close().await;
    })
}

/// Text frames only; protocol ping/pong is answered by the transport.
fn inbound_frames(receiver: SplitStream<WebSocket>) -> BoxStream<'static, InboundFrame> {
    receiver
        .filter_map(|msg| async move {
            match msg {
                Ok(Message::Text(text)) => Some(InboundFrame::Text(text.as_str().to_owned())),
                Ok(Message::Close(_)) => Some(InboundFrame::Close),
                Ok(Message::Binary(_)) => {
                    tracing::debug!("Ignoring binary frame");
                    None
                }
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    Some(InboundFrame::Close)
                }
            }
        })
        .boxed()
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, target: RoomTarget) {
    let (sender, receiver) = socket.split();

    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();
    let send_task = pusher_loop(rx, sender);

    let end = run_session(state, target, tx, inbound_frames(receiver)).await;
    tracing::debug!("Session ended: {:?}", end);

    if let Err(e) = send_task.await {
        tracing::error!("Writer task failed: {}", e);
    }
}
