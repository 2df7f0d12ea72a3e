//! Domain layer: value objects, entities and the interfaces the use cases need.

pub mod entity;
pub mod error;
pub mod message;
pub mod message_pusher;
pub mod repository;
pub mod target;
pub mod value_object;

pub use entity::{Member, Recipient, Room};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use message::{ClientMessage, PresenceEvent, ServerMessage, SignalRequest};
pub use message_pusher::{MessagePusher, OutboundFrame, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::RoomRepository;
pub use target::RoomTarget;
pub use value_object::{ClientId, IdFactory, RoomId};
