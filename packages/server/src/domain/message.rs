//! Typed messages exchanged with connections.
//!
//! Both directions use the `{ "type": ..., "data": ... }` envelope. Outbound
//! messages are produced only by the server, inbound ones are parsed from the
//! wire by `infrastructure::dto` and reach the use cases already typed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value_object::{ClientId, RoomId};

/// Outbound message (server → client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Sent once to the creator of a new room.
    Room { id: RoomId },
    /// Presence snapshot after a join or leave.
    Users {
        /// The recipient's own id.
        me: ClientId,
        /// Joined members in room iteration order.
        users: Vec<ClientId>,
        event: PresenceEvent,
    },
    /// Relayed signaling payload.
    Signal {
        sender: ClientId,
        receivers: Vec<String>,
        data: Value,
    },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// What changed in a `users` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PresenceEvent {
    Join { user: ClientId },
    Leave { user: ClientId },
}

/// Inbound message (client → server)
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    Join,
    Signal(SignalRequest),
}

/// Payload of an inbound `signal`.
///
/// Receivers stay plain strings: they are echoed back unmodified and may name
/// clients that are not (or never were) members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRequest {
    pub receivers: Vec<String>,
    #[serde(default)]
    pub data: Value,
}
