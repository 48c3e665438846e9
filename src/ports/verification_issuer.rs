use crate::domain::{ChatId, VerificationCode};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 認証コード発行ポート
///
/// ボットがチャットの求めに応じてコードを発行し、そのチャットにだけ届ける。
/// コードの所持がチャットの所有の証明になる。
#[async_trait]
pub trait VerificationIssuer: Send + Sync {
    async fn issue_for_chat(&self, chat_id: ChatId) -> Result<VerificationCode>;
}
