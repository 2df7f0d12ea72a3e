//! MessagePusher trait 定義（relay dispatcher）
//!
//! 接続への送信手段をドメイン層から抽象化します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, message::ServerMessage};

/// 接続の writer タスクに渡すフレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// JSON エンコード済みのテキストフレーム
    Text(String),
    /// ハートビートの `ping` テキストフレーム
    Ping,
    /// ソケットを閉じる
    Close,
}

/// 接続への送信チャンネル
///
/// Room の Member が保持する送信側。受信側は接続ごとの writer タスクが持つ。
pub type PusherChannel = mpsc::UnboundedSender<OutboundFrame>;

/// MessagePusher trait
///
/// `push` は送信のみで、応答・再送・キューイングは行わない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// `{type, data}` にシリアライズして 1 テキストフレームとして送信
    async fn push(
        &self,
        channel: &PusherChannel,
        message: &ServerMessage,
    ) -> Result<(), MessagePushError>;

    /// ハートビートの `ping` を送信
    async fn ping(&self, channel: &PusherChannel) -> Result<(), MessagePushError>;

    /// ソケットを閉じる
    async fn close(&self, channel: &PusherChannel) -> Result<(), MessagePushError>;
}
