//! UseCase: join 処理（presence ブロードキャスト）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - join 後の users ブロードキャスト（自分自身を含む joined メンバー全員）
//!
//! ### なぜこのテストが必要か
//! - join した本人が自分の ID と全メンバー一覧を受け取れることを保証
//! - join 前のメンバーにはブロードキャストされないことを保証

use std::sync::Arc;

use crate::domain::{ClientId, MessagePusher, PresenceEvent, RoomId, RoomRepository, ServerMessage};

use super::error::JoinError;

/// join のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// join を実行
    ///
    /// Member を joined にした後のスナップショットを、送信者を含む
    /// joined メンバー全員に `users` として送る。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ClientId>)` - join 後の joined メンバー一覧
    pub async fn execute(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<Vec<ClientId>, JoinError> {
        let recipients = self.repository.join_member(room_id, client_id).await?;
        let users: Vec<ClientId> = recipients.iter().map(|r| r.client_id.clone()).collect();

        for recipient in &recipients {
            let users_msg = ServerMessage::Users {
                me: recipient.client_id.clone(),
                users: users.clone(),
                event: PresenceEvent::Join {
                    user: client_id.clone(),
                },
            };
            if let Err(e) = self.message_pusher.push(&recipient.channel, &users_msg).await {
                tracing::warn!(
                    "Failed to push join of '{}' to '{}': {}",
                    client_id,
                    recipient.client_id,
                    e
                );
            }
        }

        tracing::info!(
            "Client '{}' joined room '{}' ({} joined)",
            client_id,
            room_id,
            users.len()
        );
        Ok(users)
    }
}
