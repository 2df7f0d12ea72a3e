//! Data Transfer Objects (DTOs) for the signaling relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: raw inbound WebSocket envelope
//! - `http`: HTTP API response DTOs
//! - `conversion`: wire envelope → domain message

pub mod conversion;
pub mod http;
pub mod websocket;
