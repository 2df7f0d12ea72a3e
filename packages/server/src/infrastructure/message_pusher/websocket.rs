//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - `ServerMessage` を `{type, data}` の JSON にシリアライズ
//! - 接続の writer タスクへフレームを渡す（push / ping / close）
//!
//! ## 設計ノート
//!
//! WebSocket の生成と書き込みは UI 層（`ui::handler::websocket`）の writer タスクが行います。
//! この実装は Member が持つ `PusherChannel` にフレームを送るだけで、
//! 応答の確認や再送は行いません。

use async_trait::async_trait;

use crate::domain::{MessagePushError, MessagePusher, OutboundFrame, PusherChannel, ServerMessage};

/// WebSocket を使った MessagePusher 実装
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketMessagePusher;

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self
    }

    fn send(channel: &PusherChannel, frame: OutboundFrame) -> Result<(), MessagePushError> {
        channel
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push(
        &self,
        channel: &PusherChannel,
        message: &ServerMessage,
    ) -> Result<(), MessagePushError> {
        let json = message
            .to_json()
            .map_err(|e| MessagePushError::SerializeFailed(e.to_string()))?;
        Self::send(channel, OutboundFrame::Text(json))
    }

    async fn ping(&self, channel: &PusherChannel) -> Result<(), MessagePushError> {
        Self::send(channel, OutboundFrame::Ping)
    }

    async fn close(&self, channel: &PusherChannel) -> Result<(), MessagePushError> {
        Self::send(channel, OutboundFrame::Close)
    }
}
