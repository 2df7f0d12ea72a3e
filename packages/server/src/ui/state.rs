//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    config::{HeartbeatConfig, ServerConfig},
    domain::{IdFactory, MessagePusher, RoomRepository},
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomUsersUseCase,
        JoinRoomUseCase, RelaySignalUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続先の解決と attach）
    pub connect_participant_usecase: ConnectParticipantUseCase,
    /// JoinRoomUseCase（join と presence 通知）
    pub join_room_usecase: JoinRoomUseCase,
    /// RelaySignalUseCase（signal の中継）
    pub relay_signal_usecase: RelaySignalUseCase,
    /// DisconnectParticipantUseCase（切断と leave 通知）
    pub disconnect_participant_usecase: DisconnectParticipantUseCase,
    /// GetRoomUsersUseCase（HTTP の Room メンバー取得）
    pub get_room_users_usecase: GetRoomUsersUseCase,
    /// MessagePusher（ハートビートと強制切断に使用）
    pub message_pusher: Arc<dyn MessagePusher>,
    pub heartbeat: HeartbeatConfig,
    pub top_redirect: String,
}

impl AppState {
    /// Wire every use case to the given registry and relay dispatcher.
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        config: &ServerConfig,
    ) -> Self {
        Self {
            connect_participant_usecase: ConnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                IdFactory::new(config.id_length),
            ),
            join_room_usecase: JoinRoomUseCase::new(repository.clone(), message_pusher.clone()),
            relay_signal_usecase: RelaySignalUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            disconnect_participant_usecase: DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            get_room_users_usecase: GetRoomUsersUseCase::new(repository),
            message_pusher,
            heartbeat: config.heartbeat,
            top_redirect: config.top_redirect.clone(),
        }
    }
}
