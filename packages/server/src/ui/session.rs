//! Per-connection state machine.
//!
//! ```text
//! CONNECTING ──attach──▶ ATTACHED(unjoined) ──join──▶ ATTACHED(joined)
//!     │                        │                            │
//!     └──no room──▶ CLOSED ◀───┴─────── close / timeout ────┘
//! ```
//!
//! The session is driven by a stream of inbound frames so it can run against
//! a real WebSocket or an in-memory channel in tests.

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::{
    domain::{ClientMessage, PusherChannel, RoomTarget},
    infrastructure::dto::{conversion::parse_client_message, websocket::PONG},
    usecase::Attachment,
};

use super::state::AppState;

/// Inbound frame as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Text(String),
    Close,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// No room could be resolved; the socket was closed without attaching.
    Rejected,
    /// The peer closed the socket.
    Closed,
    /// No `pong` arrived in time; the server closed the socket.
    HeartbeatTimeout,
}

/// Run one connection from accept to cleanup.
///
/// `channel` is the sending half of this connection's writer. Cleanup runs
/// exactly once for every attached connection, whatever ended it.
pub async fn run_session<S>(
    state: Arc<AppState>,
    target: RoomTarget,
    channel: PusherChannel,
    mut inbound: S,
) -> SessionEnd
where
    S: Stream<Item = InboundFrame> + Unpin,
{
    let attachment = match state
        .connect_participant_usecase
        .execute(target, channel.clone())
        .await
    {
        Ok(attachment) => attachment,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            if let Err(e) = state.message_pusher.close(&channel).await {
                tracing::debug!("Socket already gone while rejecting: {}", e);
            }
            return SessionEnd::Rejected;
        }
    };
    tracing::info!(
        "Client '{}' attached to room '{}'",
        attachment.client_id,
        attachment.room_id
    );

    let session = ConnectionSession {
        state,
        attachment,
        channel,
    };
    let end = session.message_loop(&mut inbound).await;
    session.disconnect(end).await;
    end
}

struct ConnectionSession {
    state: Arc<AppState>,
    attachment: Attachment,
    channel: PusherChannel,
}

impl ConnectionSession {
    async fn message_loop<S>(&self, inbound: &mut S) -> SessionEnd
    where
        S: Stream<Item = InboundFrame> + Unpin,
    {
        let heartbeat = self.state.heartbeat;
        let mut ping_interval =
            time::interval_at(Instant::now() + heartbeat.interval, heartbeat.interval);
        ping_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let pong_deadline = time::sleep(heartbeat.timeout);
        tokio::pin!(pong_deadline);
        let mut awaiting_pong = false;

        loop {
            tokio::select! {
                frame = inbound.next() => match frame {
                    Some(InboundFrame::Text(text)) if text == PONG => {
                        if awaiting_pong {
                            awaiting_pong = false;
                            tracing::debug!("Heartbeat acknowledged by '{}'", self.attachment.client_id);
                        }
                    }
                    Some(InboundFrame::Text(text)) => self.handle_text(&text).await,
                    Some(InboundFrame::Close) | None => return SessionEnd::Closed,
                },
                _ = ping_interval.tick() => {
                    if let Err(e) = self.state.message_pusher.ping(&self.channel).await {
                        tracing::debug!("Failed to ping '{}': {}", self.attachment.client_id, e);
                    }
                    // The first unanswered ping keeps its deadline
                    if !awaiting_pong {
                        pong_deadline.as_mut().reset(Instant::now() + heartbeat.timeout);
                        awaiting_pong = true;
                    }
                }
                () = &mut pong_deadline, if awaiting_pong => {
                    tracing::warn!(
                        "No heartbeat from '{}' within {:?}, closing",
                        self.attachment.client_id,
                        heartbeat.timeout
                    );
                    if let Err(e) = self.state.message_pusher.close(&self.channel).await {
                        tracing::debug!("Socket already gone while closing: {}", e);
                    }
                    return SessionEnd::HeartbeatTimeout;
                }
            }
        }
    }

    async fn handle_text(&self, text: &str) {
        let Attachment { room_id, client_id } = &self.attachment;
        tracing::debug!("Received from '{}': {}", client_id, text);

        match parse_client_message(text) {
            Ok(ClientMessage::Join) => {
                if let Err(e) = self.state.join_room_usecase.execute(room_id, client_id).await {
                    tracing::warn!("Join of '{}' failed: {}", client_id, e);
                }
            }
            Ok(ClientMessage::Signal(request)) => {
                let relayed = self
                    .state
                    .relay_signal_usecase
                    .execute(room_id, client_id, request)
                    .await;
                tracing::debug!("Relayed signal from '{}' to {} receivers", client_id, relayed);
            }
            Err(e) => {
                tracing::warn!("Ignoring message from '{}': {}", client_id, e);
            }
        }
    }

    async fn disconnect(&self, end: SessionEnd) {
        let Attachment { room_id, client_id } = &self.attachment;
        match self
            .state
            .disconnect_participant_usecase
            .execute(room_id, client_id)
            .await
        {
            Ok(outcome) => tracing::info!(
                "Client '{}' disconnected ({:?}), notified {} members{}",
                client_id,
                end,
                outcome.notified.len(),
                if outcome.room_removed {
                    ", room removed"
                } else {
                    ""
                }
            ),
            Err(e) => tracing::warn!("Failed to disconnect '{}': {}", client_id, e),
        }
    }
}
