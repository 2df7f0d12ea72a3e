//! Signaling relay server library.
//!
//! Browser peers meet in rooms over WebSocket, see each other's presence and
//! relay opaque signaling payloads (offers, answers, ICE candidates) to one
//! another. The server never interprets those payloads.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
