//! Repository trait 定義（Room registry）
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは他の接続タスクに対してアトミックに実行されなければならない。
//! 戻り値のスナップショット（joined メンバー一覧など）も変更と同時に取得する。

use async_trait::async_trait;

use super::{
    ClientId, PusherChannel, Recipient, RepositoryError, Room, RoomId,
};

/// Room Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 新しい ID で空の Room を作成して登録
    ///
    /// 未使用の ID を引けなければ `RoomIdExhausted`
    async fn create_room(&self) -> Result<RoomId, RepositoryError>;

    /// Room のスナップショットを取得
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// Member（joined=false）を Room に追加
    async fn add_member(
        &self,
        room_id: &RoomId,
        client_id: ClientId,
        channel: PusherChannel,
    ) -> Result<(), RepositoryError>;

    /// Member を joined にし、変更後の joined メンバー一覧を返す
    async fn join_member(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<Vec<Recipient>, RepositoryError>;

    /// Member を削除し、残った joined メンバー一覧を返す
    async fn remove_member(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<Vec<Recipient>, RepositoryError>;

    /// Member が 0 人なら Room を削除。削除した場合 true
    async fn remove_if_empty(&self, room_id: &RoomId) -> bool;

    /// Room 内の Member への送信チャンネルを取得
    async fn find_member(&self, room_id: &RoomId, client_id: &ClientId) -> Option<PusherChannel>;

    /// joined メンバーの ID 一覧（Room が無ければ None）
    async fn joined_client_ids(&self, room_id: &RoomId) -> Option<Vec<ClientId>>;

    /// 登録されている Room の数
    async fn count_rooms(&self) -> usize;
}
