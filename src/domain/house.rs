use serde::{Deserialize, Serialize};

use super::HouseId;

/// 宿泊棟
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
    pub name: String,
    pub description: String,
    /// 1泊あたりの基本料金（ルーブル）
    pub base_price: i64,
    /// 最大宿泊人数
    pub capacity: u32,
    /// 予約詳細で写真として送る画像（URLまたはTelegramのfile_id）
    pub image_url: String,
}
