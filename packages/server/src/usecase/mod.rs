//! UseCase layer: one use case per connection lifecycle event.

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_room_users;
pub mod join_room;
pub mod relay_signal;

pub use connect_participant::{Attachment, ConnectParticipantUseCase};
pub use disconnect_participant::{DisconnectOutcome, DisconnectParticipantUseCase};
pub use error::{ConnectError, DisconnectError, GetRoomUsersError, JoinError};
pub use get_room_users::GetRoomUsersUseCase;
pub use join_room::JoinRoomUseCase;
pub use relay_signal::RelaySignalUseCase;
