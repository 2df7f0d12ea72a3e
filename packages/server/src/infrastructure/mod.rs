//! Infrastructure layer: concrete registry, relay dispatcher and wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
