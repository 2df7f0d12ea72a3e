//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - Member の削除、残りの joined メンバーへの leave 通知、空 Room の削除
//!
//! ### なぜこのテストが必要か
//! - 切断した本人には leave が送られないことを保証
//! - 最後の Member が抜けた Room が registry に残らないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後の参加者の切断（通知対象なし、Room 削除）
//! - 異常系：存在しない参加者の切断試行

use std::sync::Arc;

use crate::domain::{ClientId, MessagePusher, PresenceEvent, RoomId, RoomRepository, ServerMessage};

use super::error::DisconnectError;

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    /// leave を通知したクライアント
    pub notified: Vec<ClientId>,
    /// Room が空になり削除されたか
    pub room_removed: bool,
}

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 切断するクライアントが attach している Room
    /// * `client_id` - 切断するクライアントの ID
    ///
    /// # Returns
    ///
    /// * `Ok(DisconnectOutcome)` - 通知対象と Room 削除の有無
    /// * `Err(DisconnectError)` - Room または Member が存在しない
    pub async fn execute(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<DisconnectOutcome, DisconnectError> {
        // 1. Member を削除し、残った joined メンバーを取得
        let remaining = self.repository.remove_member(room_id, client_id).await?;
        let users: Vec<ClientId> = remaining.iter().map(|r| r.client_id.clone()).collect();

        // 2. 残りの joined メンバーに leave を通知
        for recipient in &remaining {
            let left_msg = ServerMessage::Users {
                me: recipient.client_id.clone(),
                users: users.clone(),
                event: PresenceEvent::Leave {
                    user: client_id.clone(),
                },
            };
            if let Err(e) = self.message_pusher.push(&recipient.channel, &left_msg).await {
                tracing::warn!(
                    "Failed to push leave of '{}' to '{}': {}",
                    client_id,
                    recipient.client_id,
                    e
                );
            }
        }

        // 3. 空になった Room を削除
        let room_removed = self.repository.remove_if_empty(room_id).await;

        tracing::info!("Client '{}' left room '{}'", client_id, room_id);
        Ok(DisconnectOutcome {
            notified: users,
            room_removed,
        })
    }
}
