/// 予約のビジネスルール違反
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationRuleError {
    /// チェックアウトがチェックイン以前
    InvalidDates,
    /// 宿泊人数が0
    NoGuests,
    /// 定員超過
    CapacityExceeded { capacity: u32, requested: u32 },
}
