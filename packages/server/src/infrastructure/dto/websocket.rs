//! WebSocket wire DTOs.

use serde::Deserialize;
use serde_json::Value;

/// Literal heartbeat frames. They are not JSON.
pub const PING: &str = "ping";
pub const PONG: &str = "pong";

/// Inbound `{type, data}` envelope before the `type` is checked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl ClientEnvelope {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
