//! Telegram bot: reservation notifications and the "my reservations" browser.
//!
//! Outbound delivery goes through the [`ChatTransport`](crate::ports::ChatTransport) port;
//! nothing here keeps state between interactions.

pub mod callback;
pub mod dispatcher;
pub mod query_handler;
pub mod render;

use crate::domain::ChatId;
use crate::ports::TransportError;
use std::future::Future;
use std::time::Duration;

pub use dispatcher::{DeliveryReport, NotificationDispatcher};
pub use query_handler::{ChatInteraction, QueryHandler};

/// 送信1回あたりのデフォルト制限時間
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// ボット設定
///
/// 起動時に一度だけ組み立て、以後は変更しない。
/// 通知ディスパッチャーと照会ハンドラーに明示的に渡す。
#[derive(Debug, Clone)]
pub struct BotConfig {
    admin_chat_ids: Vec<ChatId>,
    contact_phone: String,
    send_timeout: Duration,
}

impl BotConfig {
    pub fn new(
        admin_chat_ids: Vec<ChatId>,
        contact_phone: impl Into<String>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            admin_chat_ids,
            contact_phone: contact_phone.into(),
            send_timeout,
        }
    }

    /// 新規予約の通知先（運営者）
    pub fn admin_chat_ids(&self) -> &[ChatId] {
        &self.admin_chat_ids
    }

    /// ゲスト向けメッセージに載せる連絡先
    pub fn contact_phone(&self) -> &str {
        &self.contact_phone
    }

    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }
}

/// 外部呼び出しを制限時間付きで実行する
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| TransportError::Timeout(limit))?
}
