use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ExtraBooking, Guest, House, Reservation, ReservationId};

/// イベント：予約が作成された
///
/// 通知1回分のスナップショット。作成後に変更されることはなく、
/// 通知側には参照でのみ渡される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCreatedMessage {
    pub reservation_id: ReservationId,
    pub house: String,
    pub guest_name: String,
    pub guest_phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests_count: u32,
    pub total_price: i64,
    pub extras: Vec<ExtraBooking>,
}

impl ReservationCreatedMessage {
    pub fn new(reservation: &Reservation, house: &House, guest: &Guest) -> Self {
        Self {
            reservation_id: reservation.id,
            house: house.name.clone(),
            guest_name: guest.name.clone(),
            guest_phone: guest.phone.clone(),
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            guests_count: reservation.guests_count,
            total_price: reservation.total_price,
            extras: reservation.extras.clone(),
        }
    }
}
