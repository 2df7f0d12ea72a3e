//! UseCase: signal の中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelaySignalUseCase::execute() メソッド
//! - receivers の順に、Room の Member へ signal を中継する
//!
//! ### なぜこのテストが必要か
//! - payload と receivers が加工されずに届くことを保証
//! - Member でない receiver に当たった時点で残りを打ち切ることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：全 receiver が Member
//! - エッジケース：途中に Member でない receiver、空の receivers

use std::sync::Arc;

use crate::domain::{
    ClientId, MessagePusher, PusherChannel, RoomId, RoomRepository, ServerMessage, SignalRequest,
};

/// signal 中継のユースケース
pub struct RelaySignalUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    /// 新しい RelaySignalUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// signal を中継
    ///
    /// 最初に見つからなかった receiver 以降は中継しない。送信者には何も通知しない。
    ///
    /// # Returns
    ///
    /// 中継を試みた receiver の数
    pub async fn execute(
        &self,
        room_id: &RoomId,
        sender: &ClientId,
        request: SignalRequest,
    ) -> usize {
        let signal_msg = ServerMessage::Signal {
            sender: sender.clone(),
            receivers: request.receivers.clone(),
            data: request.data,
        };

        let mut relayed = 0;
        for receiver in &request.receivers {
            let Some(channel) = self.find_receiver(room_id, receiver).await else {
                tracing::debug!(
                    "Receiver '{}' is not in room '{}', dropping remaining receivers",
                    receiver,
                    room_id
                );
                break;
            };

            if let Err(e) = self.message_pusher.push(&channel, &signal_msg).await {
                tracing::warn!("Failed to relay signal from '{}' to '{}': {}", sender, receiver, e);
            }
            relayed += 1;
        }
        relayed
    }

    async fn find_receiver(
        &self,
        room_id: &RoomId,
        receiver: &str,
    ) -> Option<PusherChannel> {
        let client_id = ClientId::new(receiver.to_string()).ok()?;
        self.repository.find_member(room_id, &client_id).await
    }
}
