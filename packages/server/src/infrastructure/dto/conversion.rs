//! Conversion logic between wire DTOs and domain messages.

use thiserror::Error;

use crate::domain::{ClientMessage, SignalRequest};
use crate::infrastructure::dto::websocket::ClientEnvelope;

/// Why an inbound text frame was not turned into a `ClientMessage`.
#[derive(Debug, Error)]
pub enum ClientMessageError {
    #[error("invalid JSON envelope: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unknown message type '{0}'")]
    UnknownType(String),

    #[error("invalid signal payload: {0}")]
    InvalidSignal(serde_json::Error),
}

// ========================================
// DTO → Domain Message
// ========================================

impl TryFrom<ClientEnvelope> for ClientMessage {
    type Error = ClientMessageError;

    fn try_from(envelope: ClientEnvelope) -> Result<Self, Self::Error> {
        match envelope.kind.as_str() {
            "join" => Ok(ClientMessage::Join),
            "signal" => serde_json::from_value::<SignalRequest>(envelope.data)
                .map(ClientMessage::Signal)
                .map_err(ClientMessageError::InvalidSignal),
            other => Err(ClientMessageError::UnknownType(other.to_string())),
        }
    }
}

/// Parse one inbound text frame (other than the heartbeat token).
pub fn parse_client_message(text: &str) -> Result<ClientMessage, ClientMessageError> {
    ClientMessage::try_from(ClientEnvelope::parse(text)?)
}
