use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    ExtraBooking, Guest, GuestId, House, HouseId, PriceCoefficients, ReservationCreatedMessage,
    ReservationId, ReservationRuleError, pricing,
};

// ============================================================================
// ステータス
// ============================================================================

/// 予約ステータス
///
/// ワイヤ上の文字列（`confirmed` など）は外部との安定した契約。
/// 未知の値は `Other` として保持し、エラーにはしない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
    CheckedIn,
    CheckOut,
    Other(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::CheckedIn => "checked_in",
            ReservationStatus::CheckOut => "check_out",
            ReservationStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for ReservationStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "confirmed" => ReservationStatus::Confirmed,
            "cancelled" => ReservationStatus::Cancelled,
            "checked_in" => ReservationStatus::CheckedIn,
            "check_out" => ReservationStatus::CheckOut,
            other => ReservationStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ReservationStatus {
    fn from(raw: String) -> Self {
        ReservationStatus::from(raw.as_str())
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.as_str().to_string()
    }
}

// ============================================================================
// 集約と読み取りビュー
// ============================================================================

/// 予約集約
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub house_id: HouseId,
    pub guest_id: GuestId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests_count: u32,
    pub total_price: i64,
    pub status: ReservationStatus,
    pub extras: Vec<ExtraBooking>,
    pub created_at: DateTime<Utc>,
}

/// 予約一覧の1行分（一覧表示専用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSummary {
    pub id: ReservationId,
    pub house_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// 予約詳細
///
/// 詳細表示のたびに取得する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetail {
    pub id: ReservationId,
    pub house_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests_count: u32,
    pub total_price: i64,
    pub status: ReservationStatus,
    pub extras: Vec<ExtraBooking>,
    pub image_url: String,
}

/// 滞在の申込内容（検証前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests_count: u32,
}

// ============================================================================
// 純粋関数
// ============================================================================

/// 宿泊棟を予約する（純粋な関数）
///
/// ビジネスルール：
/// - チェックアウトはチェックインより後であること
/// - 宿泊人数は1人以上、宿泊棟の定員以下であること
/// - 合計金額 = 滞在料金 + 追加サービス料金
///
/// 新しい予約集約と、通知用のスナップショットを返す。
pub fn book_house(
    house: &House,
    guest: &Guest,
    stay: &StayRequest,
    extras: Vec<ExtraBooking>,
    coefficients: &PriceCoefficients,
    now: DateTime<Utc>,
) -> Result<(Reservation, ReservationCreatedMessage), ReservationRuleError> {
    if stay.check_out <= stay.check_in {
        return Err(ReservationRuleError::InvalidDates);
    }
    if stay.guests_count == 0 {
        return Err(ReservationRuleError::NoGuests);
    }
    if stay.guests_count > house.capacity {
        return Err(ReservationRuleError::CapacityExceeded {
            capacity: house.capacity,
            requested: stay.guests_count,
        });
    }

    let stay_total = pricing::stay_price(house.base_price, stay.check_in, stay.check_out, coefficients);
    let extras_total: i64 = extras.iter().map(|e| e.price).sum();

    let reservation = Reservation {
        id: ReservationId::new(),
        house_id: house.id,
        guest_id: guest.id,
        check_in: stay.check_in,
        check_out: stay.check_out,
        guests_count: stay.guests_count,
        total_price: stay_total + extras_total,
        status: ReservationStatus::Confirmed,
        extras,
        created_at: now,
    };

    let message = ReservationCreatedMessage::new(&reservation, house, guest);

    Ok((reservation, message))
}
