use serde::{Deserialize, Serialize};

use super::{ChatId, GuestId};

/// ゲスト
///
/// 電話番号で一意に識別される。Telegramと連携済みの場合のみ chat_id を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    pub phone: String,
    pub telegram_chat_id: Option<ChatId>,
}
