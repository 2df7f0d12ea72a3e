//! UseCase error types.

use thiserror::Error;

use crate::domain::RepositoryError;

/// 接続（Room への attach）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// パスの形式が不正
    #[error("Connection path does not name a room")]
    InvalidTarget,

    /// 指定した Room が存在しない
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    /// 未使用の room_id を生成できなかった
    #[error("Could not allocate a unique room ID")]
    RoomIdExhausted,

    /// 未使用の client_id を生成できなかった
    #[error("Could not allocate a unique client ID")]
    ClientIdExhausted,
}

/// join のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Room メンバー取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomUsersError {
    #[error("Room not found")]
    RoomNotFound,
}
