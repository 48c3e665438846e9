use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ExtraId;

/// 追加サービス（バーニャ、サウナ枠など）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub id: ExtraId,
    pub name: String,
    /// 1枠あたりの料金
    pub price: i64,
    pub fill_options: Vec<FillOption>,
}

impl Extra {
    pub fn fill_option(&self, fill_option_id: i64) -> Option<&FillOption> {
        self.fill_options.iter().find(|o| o.id == fill_option_id)
    }
}

/// 追加サービスのオプション（例：バーニャの香草）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOption {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

/// 予約に紐づく追加サービスの予約枠
///
/// 値オブジェクト。予約とは独立したライフサイクルを持たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraBooking {
    pub extra_id: ExtraId,
    pub name: String,
    pub date: NaiveDate,
    /// 開始時刻（"14:00" 形式）
    pub time_from: String,
    pub time_to: String,
    pub fill_option: Option<String>,
    pub price: i64,
}
