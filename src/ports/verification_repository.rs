use crate::domain::VerificationCode;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 認証コードリポジトリポート
///
/// 有効期限の判定はしない。期限の境界は呼び出し側が渡す。
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// コードを登録する
    ///
    /// 同じ値のコードが `expired_before` より後に作られていれば（まだ有効なら）
    /// 何も変更せず `false` を返す。期限切れのコードは置き換える。
    async fn try_insert(
        &self,
        code: &VerificationCode,
        expired_before: DateTime<Utc>,
    ) -> Result<bool>;

    /// コードを取り出して削除する
    ///
    /// 取得と削除は不可分。同じコードを同時に取り出しても、得られるのは1件だけ。
    async fn take(&self, code: &str) -> Result<Option<VerificationCode>>;
}
