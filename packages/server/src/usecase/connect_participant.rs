//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続先の解決（Room 作成 / 既存 Room への attach / 拒否）
//!
//! ### なぜこのテストが必要か
//! - Room 作成時に作成者へ room メッセージが届くことを保証
//! - 解決できない接続が registry を変更しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：空パスでの Room 作成、既存 Room への attach
//! - 異常系：存在しない Room、不正なパス、Room ID の枯渇

use std::sync::Arc;

use crate::domain::{
    ClientId, IdFactory, MessagePusher, PusherChannel, RepositoryError, RoomId, RoomRepository,
    RoomTarget, ServerMessage,
};

use super::error::ConnectError;

/// client_id の衝突時に引き直す回数の上限
const MAX_CLIENT_ID_ATTEMPTS: usize = 8;

/// Room に attach した接続
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub room_id: RoomId,
    pub client_id: ClientId,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// client_id の生成器
    id_factory: IdFactory,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        id_factory: IdFactory,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            id_factory,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `target` - パスから解決した接続先
    /// * `channel` - この接続への送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Attachment)` - joined=false の Member として登録された
    /// * `Err(ConnectError)` - 接続先を解決できなかった（registry は変更しない）
    pub async fn execute(
        &self,
        target: RoomTarget,
        channel: PusherChannel,
    ) -> Result<Attachment, ConnectError> {
        match target {
            RoomTarget::Create => {
                let room_id = self
                    .repository
                    .create_room()
                    .await
                    .map_err(|_| ConnectError::RoomIdExhausted)?;

                let room_msg = ServerMessage::Room {
                    id: room_id.clone(),
                };
                if let Err(e) = self.message_pusher.push(&channel, &room_msg).await {
                    tracing::warn!("Failed to send room id '{}': {}", room_id, e);
                }

                match self.attach(&room_id, channel).await {
                    Ok(attachment) => Ok(attachment),
                    Err(e) => {
                        self.repository.remove_if_empty(&room_id).await;
                        Err(e)
                    }
                }
            }
            RoomTarget::Attach(room_id) => self.attach(&room_id, channel).await,
            RoomTarget::Invalid => Err(ConnectError::InvalidTarget),
        }
    }

    async fn attach(
        &self,
        room_id: &RoomId,
        channel: PusherChannel,
    ) -> Result<Attachment, ConnectError> {
        for _ in 0..MAX_CLIENT_ID_ATTEMPTS {
            let client_id = self.id_factory.client_id();
            match self
                .repository
                .add_member(room_id, client_id.clone(), channel.clone())
                .await
            {
                Ok(()) => {
                    return Ok(Attachment {
                        room_id: room_id.clone(),
                        client_id,
                    });
                }
                Err(RepositoryError::DuplicateClientId(id)) => {
                    tracing::warn!("Client ID collision on '{}', drawing again", id);
                }
                Err(_) => return Err(ConnectError::RoomNotFound(room_id.as_str().to_string())),
            }
        }
        Err(ConnectError::ClientIdExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::OutboundFrame,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
    };
    use tokio::sync::mpsc;

    fn create_test_usecase() -> (ConnectParticipantUseCase, Arc<InMemoryRoomRepository>) {
        let repository = Arc::new(InMemoryRoomRepository::new(IdFactory::new(16)));
        let usecase = ConnectParticipantUseCase::new(
            repository.clone(),
            Arc::new(WebSocketMessagePusher::new()),
            IdFactory::new(16),
        );
        (usecase, repository)
    }

    #[tokio::test]
    async fn test_create_target_creates_room_and_announces_id() {
        // テスト項目: 空パスで接続すると Room が作成され room メッセージが届く
        // given (前提条件):
        let (usecase, repository) = create_test_usecase();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let attachment = usecase.execute(RoomTarget::Create, tx).await.unwrap();

        // then (期待する結果):
        let expected = ServerMessage::Room {
            id: attachment.room_id.clone(),
        }
        .to_json()
        .unwrap();
        assert_eq!(rx.recv().await, Some(OutboundFrame::Text(expected)));

        let room = repository.get_room(&attachment.room_id).await.unwrap();
        assert_eq!(room.members.len(), 1);
        assert_eq!(room.members[0].id, attachment.client_id);
        assert!(!room.members[0].joined);
    }

    #[tokio::test]
    async fn test_attach_to_existing_room() {
        // テスト項目: 既存 Room の ID で接続すると同じ Room に attach される
        // given (前提条件):
        let (usecase, repository) = create_test_usecase();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let first = usecase.execute(RoomTarget::Create, tx1).await.unwrap();

        // when (操作):
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let second = usecase
            .execute(RoomTarget::Attach(first.room_id.clone()), tx2)
            .await
            .unwrap();

        // then (期待する結果): attach 側には room メッセージは送られない
        assert_eq!(second.room_id, first.room_id);
        assert_ne!(second.client_id, first.client_id);
        assert!(rx2.try_recv().is_err());
        let room = repository.get_room(&first.room_id).await.unwrap();
        assert_eq!(room.members.len(), 2);
        assert_eq!(repository.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_attach_to_unknown_room_is_rejected() {
        // テスト項目: 存在しない Room への接続は拒否され registry は変わらない
        // given (前提条件):
        let (usecase, repository) = create_test_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();
        let unknown = RoomId::new("unknown".to_string()).unwrap();

        // when (操作):
        let result = usecase.execute(RoomTarget::Attach(unknown), tx).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConnectError::RoomNotFound("unknown".to_string()))
        );
        assert_eq!(repository.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_target_is_rejected() {
        // テスト項目: 不正なパスでの接続は拒否される
        // given (前提条件):
        let (usecase, repository) = create_test_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(RoomTarget::Invalid, tx).await;

        // then (期待する結果):
        assert_eq!(result, Err(ConnectError::InvalidTarget));
        assert_eq!(repository.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_create_is_rejected_when_room_ids_are_exhausted() {
        // テスト項目: Room ID を確保できない場合は接続を拒否し、room メッセージは送らない
        // given (前提条件): 1 文字の ID 空間を使い切った registry
        let repository = Arc::new(InMemoryRoomRepository::new(IdFactory::new(1)));
        let usecase = ConnectParticipantUseCase::new(
            repository.clone(),
            Arc::new(WebSocketMessagePusher::new()),
            IdFactory::new(16),
        );
        while repository.count_rooms().await < 64 {
            let _ = repository.create_room().await;
        }
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(RoomTarget::Create, tx).await;

        // then (期待する結果):
        assert_eq!(result, Err(ConnectError::RoomIdExhausted));
        assert!(rx.try_recv().is_err());
        assert_eq!(repository.count_rooms().await, 64);
    }
}
