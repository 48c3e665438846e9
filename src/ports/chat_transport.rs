use crate::domain::ChatId;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// チャット送信のエラー
#[derive(Debug, Error)]
pub enum TransportError {
    /// 制限時間内に応答がなかった
    #[error("Chat transport timed out after {0:?}")]
    Timeout(Duration),

    /// プラットフォームがリクエストを拒否した
    #[error("Chat platform rejected request: {description}")]
    Rejected { description: String },

    /// 通信そのものの失敗
    #[error("Chat transport request failed")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// インラインボタン
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

/// 送信メッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: ChatId,
    /// Markdown（Telegram legacy）として解釈される本文
    pub text: String,
    /// インラインキーボードの行。空ならキーボードなし
    pub keyboard: Vec<Vec<InlineButton>>,
}

impl OutboundMessage {
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    pub fn with_keyboard(mut self, keyboard: Vec<Vec<InlineButton>>) -> Self {
        self.keyboard = keyboard;
        self
    }
}

/// 写真付きメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundPhoto {
    pub chat_id: ChatId,
    /// URL またはプラットフォームのファイルID
    pub photo: String,
    pub caption: String,
}

/// コールバックへの応答（トースト／アラート）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackAnswer {
    pub callback_id: String,
    pub text: Option<String>,
    pub show_alert: bool,
}

/// チャット送信ポート
///
/// 呼び出しごとに状態を持たないクライアント。複数タスクから共有して使う。
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, message: OutboundMessage) -> Result<(), TransportError>;

    async fn send_photo(&self, photo: OutboundPhoto) -> Result<(), TransportError>;

    async fn answer_callback(&self, answer: CallbackAnswer) -> Result<(), TransportError>;
}
