use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::commands::{CreateReservation, ExtraRequest};
use crate::domain::{ChatId, ExtraBooking, ExtraId, HouseId, Reservation};

/// 予約作成リクエスト（POST /reservations）
///
/// チャットIDは受け取らない。ボットの /verify で発行されたコードを渡すと、
/// そのコードのチャットに予約が紐づく。
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub house_id: i64,
    pub guest_name: String,
    pub guest_phone: String,
    pub verification_code: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests_count: u32,
    #[serde(default)]
    pub extras: Vec<ExtraRequestBody>,
}

#[derive(Debug, Deserialize)]
pub struct ExtraRequestBody {
    pub extra_id: i64,
    pub date: NaiveDate,
    pub time_from: String,
    pub time_to: String,
    pub fill_option_id: Option<i64>,
}

impl CreateReservationRequest {
    /// 空白だけのコードは未指定として扱う
    pub fn verification_code(&self) -> Option<&str> {
        self.verification_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// `telegram_chat_id` は認証コードで確認済みのものだけを渡す
    pub fn to_command(self, telegram_chat_id: Option<ChatId>) -> CreateReservation {
        CreateReservation {
            house_id: HouseId::new(self.house_id),
            guest_name: self.guest_name,
            guest_phone: self.guest_phone,
            telegram_chat_id,
            check_in: self.check_in,
            check_out: self.check_out,
            guests_count: self.guests_count,
            extras: self
                .extras
                .into_iter()
                .map(|extra| ExtraRequest {
                    extra_id: ExtraId::new(extra.extra_id),
                    date: extra.date,
                    time_from: extra.time_from,
                    time_to: extra.time_to,
                    fill_option_id: extra.fill_option_id,
                })
                .collect(),
        }
    }
}

/// 予約作成レスポンス
#[derive(Debug, Serialize)]
pub struct ReservationCreatedResponse {
    pub reservation_id: Uuid,
    pub house_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests_count: u32,
    pub total_price: i64,
    pub status: String,
    pub extras: Vec<ExtraBooking>,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationCreatedResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            reservation_id: reservation.id.value(),
            house_id: reservation.house_id.value(),
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            guests_count: reservation.guests_count,
            total_price: reservation.total_price,
            status: reservation.status.as_str().to_string(),
            extras: reservation.extras,
            created_at: reservation.created_at,
        }
    }
}

/// 認証コード確認リクエスト（POST /verification/confirm）
#[derive(Debug, Deserialize)]
pub struct ConfirmVerificationRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct VerificationConfirmedResponse {
    pub telegram_chat_id: i64,
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
