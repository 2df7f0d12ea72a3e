//! UseCase: Room の joined メンバー一覧取得（HTTP クエリ用）

use std::sync::Arc;

use crate::domain::{ClientId, RoomId, RoomRepository};

use super::error::GetRoomUsersError;

/// Room メンバー取得のユースケース
pub struct GetRoomUsersUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomUsersUseCase {
    /// 新しい GetRoomUsersUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// joined メンバーの ID 一覧を取得
    ///
    /// ID として不正な文字列は存在しない Room と同じ扱いにする。
    pub async fn execute(&self, room_id: String) -> Result<Vec<ClientId>, GetRoomUsersError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomUsersError::RoomNotFound)?;
        self.repository
            .joined_client_ids(&room_id)
            .await
            .ok_or(GetRoomUsersError::RoomNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::IdFactory, infrastructure::repository::InMemoryRoomRepository};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_users_match_joined_members() {
        // テスト項目: joined=true の Member だけが返される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(IdFactory::new(16)));
        let usecase = GetRoomUsersUseCase::new(repository.clone());
        let room_id = repository.create_room().await.unwrap();
        for id in ["alice", "bob"] {
            let (tx, _rx) = mpsc::unbounded_channel();
            repository
                .add_member(&room_id, ClientId::new(id.to_string()).unwrap(), tx)
                .await
                .unwrap();
        }
        let bob = ClientId::new("bob".to_string()).unwrap();
        repository.join_member(&room_id, &bob).await.unwrap();

        // when (操作):
        let result = usecase.execute(room_id.into_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![bob]));
    }

    #[tokio::test]
    async fn test_unknown_room_is_not_found() {
        // テスト項目: 存在しない Room は RoomNotFound
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(IdFactory::new(16)));
        let usecase = GetRoomUsersUseCase::new(repository);

        // when (操作) / then (期待する結果):
        assert_eq!(
            usecase.execute("unknown".to_string()).await,
            Err(GetRoomUsersError::RoomNotFound)
        );
        assert_eq!(
            usecase.execute(String::new()).await,
            Err(GetRoomUsersError::RoomNotFound)
        );
    }
}
