use crate::domain::Guest;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ゲストリポジトリポート
#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Guest>>;

    /// ゲストを保存する
    ///
    /// 電話番号をキーにしたupsert。
    async fn save(&self, guest: &Guest) -> Result<()>;
}
