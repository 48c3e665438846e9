use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ChatId, ExtraId, HouseId};

/// コマンド：宿泊棟を予約する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservation {
    pub house_id: HouseId,
    pub guest_name: String,
    pub guest_phone: String,
    /// 認証コードで確認済みのチャットのみ。確認メッセージの送信先になる
    pub telegram_chat_id: Option<ChatId>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests_count: u32,
    #[serde(default)]
    pub extras: Vec<ExtraRequest>,
}

/// 追加サービスの申込
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraRequest {
    pub extra_id: ExtraId,
    pub date: NaiveDate,
    pub time_from: String,
    pub time_to: String,
    pub fill_option_id: Option<i64>,
}
