//! Domain error types.

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// ID が空文字列
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// ID に使用できない文字が含まれている
    #[error("{kind} contains invalid character: '{value}'")]
    InvalidCharacter { kind: &'static str, value: String },
}

/// Repository（Room registry）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 指定した Room が存在しない
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    /// 指定した Member が Room に存在しない
    #[error("Member '{0}' not found")]
    MemberNotFound(String),

    /// 同じ client_id の Member が既に存在する
    #[error("Client ID '{0}' is already attached to the room")]
    DuplicateClientId(String),

    /// 生存中の Room と衝突しない ID を生成できなかった
    #[error("Could not allocate a unique room ID")]
    RoomIdExhausted,
}

/// MessagePusher（relay dispatcher）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先の接続が既に閉じている
    #[error("Failed to push message: {0}")]
    PushFailed(String),

    /// メッセージのシリアライズに失敗
    #[error("Failed to serialize message: {0}")]
    SerializeFailed(String),
}
