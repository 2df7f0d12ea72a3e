//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 全ての Room を 1 つの Mutex で保護し、Room と registry への変更を
//! 接続タスク間で直列化します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClientId, IdFactory, Member, PusherChannel, Recipient, RepositoryError, Room, RoomId,
    RoomRepository,
};

/// room_id の衝突時に引き直す回数の上限
const MAX_ROOM_ID_ATTEMPTS: usize = 8;

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// room_id → Room
    rooms: Mutex<HashMap<RoomId, Room>>,
    /// Room ID の生成器
    id_factory: IdFactory,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(id_factory: IdFactory) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            id_factory,
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new(IdFactory::default())
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self) -> Result<RoomId, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        // 生存中の Room と衝突した ID は上限回数まで引き直す
        let room_id = (0..MAX_ROOM_ID_ATTEMPTS)
            .map(|_| self.id_factory.room_id())
            .find(|candidate| {
                let taken = rooms.contains_key(candidate);
                if taken {
                    tracing::warn!("Room ID collision on '{}', drawing again", candidate);
                }
                !taken
            })
            .ok_or(RepositoryError::RoomIdExhausted)?;

        rooms.insert(room_id.clone(), Room::new(room_id.clone()));
        tracing::info!("Room '{}' created ({} rooms live)", room_id, rooms.len());
        Ok(room_id)
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn add_member(
        &self,
        room_id: &RoomId,
        client_id: ClientId,
        channel: PusherChannel,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.add_member(Member::new(client_id, channel))
    }

    async fn join_member(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<Vec<Recipient>, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.mark_joined(client_id)?;
        Ok(room.joined_recipients())
    }

    async fn remove_member(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<Vec<Recipient>, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.remove_member(client_id)
            .ok_or_else(|| RepositoryError::MemberNotFound(client_id.as_str().to_string()))?;
        Ok(room.joined_recipients())
    }

    async fn remove_if_empty(&self, room_id: &RoomId) -> bool {
        let mut rooms = self.rooms.lock().await;
        if rooms.get(room_id).is_some_and(Room::is_empty) {
            rooms.remove(room_id);
            tracing::info!("Room '{}' removed ({} rooms live)", room_id, rooms.len());
            true
        } else {
            false
        }
    }

    async fn find_member(&self, room_id: &RoomId, client_id: &ClientId) -> Option<PusherChannel> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)?
            .member(client_id)
            .map(|member| member.channel.clone())
    }

    async fn joined_client_ids(&self, room_id: &RoomId) -> Option<Vec<ClientId>> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(Room::joined_client_ids)
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の Room 作成・取得・削除
    // - Member の追加・join・削除と joined スナップショット
    //
    // 【なぜこのテストが必要か】
    // - 空の Room が registry に残らないことを保証する
    // - users 一覧が joined=true の Member と常に一致することを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. Room 作成直後は空で取得できる
    // 2. join 後のスナップショットに自分が含まれる
    // 3. 最後の Member が抜けると Room が削除される
    // 4. Member が残っている Room は削除されない
    // 5. 存在しない Room への操作はエラー
    // 6. ID 空間を使い切ると作成はエラーになり、ロックは解放される
    // ========================================

    fn create_test_repository() -> InMemoryRoomRepository {
        InMemoryRoomRepository::new(IdFactory::new(16))
    }

    fn client_id(value: &str) -> ClientId {
        ClientId::new(value.to_string()).unwrap()
    }

    fn channel() -> PusherChannel {
        mpsc::unbounded_channel().0
    }

    fn ids(recipients: &[Recipient]) -> Vec<&str> {
        recipients.iter().map(|r| r.client_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_room_is_empty_and_retrievable() {
        // テスト項目: 作成した Room は空で、registry から取得できる
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let room_id = repo.create_room().await.unwrap();

        // then (期待する結果):
        let room = repo.get_room(&room_id).await.expect("room should exist");
        assert!(room.is_empty());
        assert_eq!(room.id, room_id);
        assert_eq!(repo.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_create_room_yields_fresh_ids() {
        // テスト項目: 作成のたびに未使用の ID が返される
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let first = repo.create_room().await.unwrap();
        let second = repo.create_room().await.unwrap();

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(repo.count_rooms().await, 2);
    }

    #[tokio::test]
    async fn test_join_member_snapshot_includes_joiner() {
        // テスト項目: join 後のスナップショットに join した Member が含まれる
        // given (前提条件):
        let repo = create_test_repository();
        let room_id = repo.create_room().await.unwrap();
        repo.add_member(&room_id, client_id("alice"), channel())
            .await
            .unwrap();
        repo.add_member(&room_id, client_id("bob"), channel())
            .await
            .unwrap();

        // when (操作):
        let after_alice = repo.join_member(&room_id, &client_id("alice")).await.unwrap();
        let after_bob = repo.join_member(&room_id, &client_id("bob")).await.unwrap();

        // then (期待する結果):
        assert_eq!(ids(&after_alice), vec!["alice"]);
        assert_eq!(ids(&after_bob), vec!["alice", "bob"]);
        assert_eq!(
            repo.joined_client_ids(&room_id).await,
            Some(vec![client_id("alice"), client_id("bob")])
        );
    }

    #[tokio::test]
    async fn test_remove_last_member_removes_room() {
        // テスト項目: 最後の Member が抜けた Room は取得できなくなる
        // given (前提条件):
        let repo = create_test_repository();
        let room_id = repo.create_room().await.unwrap();
        repo.add_member(&room_id, client_id("alice"), channel())
            .await
            .unwrap();

        // when (操作):
        let remaining = repo
            .remove_member(&room_id, &client_id("alice"))
            .await
            .unwrap();
        let removed = repo.remove_if_empty(&room_id).await;

        // then (期待する結果):
        assert!(remaining.is_empty());
        assert!(removed);
        assert!(repo.get_room(&room_id).await.is_none());
        assert_eq!(repo.joined_client_ids(&room_id).await, None);
        assert_eq!(repo.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_room_with_members_is_kept() {
        // テスト項目: Member が残っている Room は削除されない
        // given (前提条件):
        let repo = create_test_repository();
        let room_id = repo.create_room().await.unwrap();
        repo.add_member(&room_id, client_id("alice"), channel())
            .await
            .unwrap();
        repo.add_member(&room_id, client_id("bob"), channel())
            .await
            .unwrap();
        repo.join_member(&room_id, &client_id("bob")).await.unwrap();

        // when (操作):
        let remaining = repo
            .remove_member(&room_id, &client_id("alice"))
            .await
            .unwrap();
        let removed = repo.remove_if_empty(&room_id).await;

        // then (期待する結果):
        assert_eq!(ids(&remaining), vec!["bob"]);
        assert!(!removed);
        assert!(repo.get_room(&room_id).await.is_some());
    }

    #[tokio::test]
    async fn test_operations_on_unknown_room() {
        // テスト項目: 存在しない Room への操作はエラーまたは None
        // given (前提条件):
        let repo = create_test_repository();
        let unknown = RoomId::new("unknown".to_string()).unwrap();

        // when (操作):
        let added = repo.add_member(&unknown, client_id("alice"), channel()).await;

        // then (期待する結果):
        assert_eq!(
            added,
            Err(RepositoryError::RoomNotFound("unknown".to_string()))
        );
        assert!(repo.find_member(&unknown, &client_id("alice")).await.is_none());
        assert!(!repo.remove_if_empty(&unknown).await);
        assert_eq!(repo.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_find_member_includes_unjoined_members() {
        // テスト項目: join 前の Member も送信チャンネルを取得できる
        // given (前提条件):
        let repo = create_test_repository();
        let room_id = repo.create_room().await.unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        repo.add_member(&room_id, client_id("alice"), tx)
            .await
            .unwrap();

        // when (操作):
        let found = repo.find_member(&room_id, &client_id("alice")).await;
        let missing = repo.find_member(&room_id, &client_id("bob")).await;

        // then (期待する結果):
        assert!(found.is_some());
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_room_fails_when_ids_are_exhausted() {
        // テスト項目: 未使用の ID を引けない場合は無限に引き直さずエラーを返す
        // given (前提条件): 1 文字の ID は 64 通りしかない
        let repo = InMemoryRoomRepository::new(IdFactory::new(1));

        // when (操作):
        let mut created = 0;
        let error = loop {
            match repo.create_room().await {
                Ok(_) => created += 1,
                Err(e) => break e,
            }
            assert!(created <= 64, "more rooms than distinct ids");
        };

        // then (期待する結果): registry は引き続き利用できる
        assert_eq!(error, RepositoryError::RoomIdExhausted);
        assert_eq!(repo.count_rooms().await, created);
    }
}
