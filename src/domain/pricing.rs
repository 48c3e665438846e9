use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// 価格係数
///
/// 基本料金に掛ける倍率。金曜・土曜の夜は週末料金。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceCoefficients {
    pub weekday: f64,
    pub weekend: f64,
}

impl PriceCoefficients {
    /// 係数がすべて正の有限値であるか
    pub fn is_valid(&self) -> bool {
        [self.weekday, self.weekend]
            .iter()
            .all(|c| c.is_finite() && *c > 0.0)
    }

    /// 指定日の夜に適用される係数
    pub fn for_night(&self, night: NaiveDate) -> f64 {
        match night.weekday() {
            Weekday::Fri | Weekday::Sat => self.weekend,
            _ => self.weekday,
        }
    }
}

impl Default for PriceCoefficients {
    fn default() -> Self {
        Self {
            weekday: 1.0,
            weekend: 1.0,
        }
    }
}

/// 滞在料金を計算する（純粋な関数）
///
/// check_in の夜から check_out の前夜までの各泊に係数を掛けて合計する。
/// 1泊ごとに整数ルーブルへ丸める。
pub fn stay_price(
    base_price: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    coefficients: &PriceCoefficients,
) -> i64 {
    check_in
        .iter_days()
        .take_while(|night| *night < check_out)
        .map(|night| (base_price as f64 * coefficients.for_night(night)).round() as i64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stay_price_weekdays_only() {
        let coefs = PriceCoefficients {
            weekday: 1.0,
            weekend: 1.5,
        };
        // 2025-06-02 は月曜日
        let price = stay_price(10_000, date(2025, 6, 2), date(2025, 6, 4), &coefs);
        assert_eq!(price, 20_000);
    }

    #[test]
    fn test_stay_price_includes_weekend_nights() {
        let coefs = PriceCoefficients {
            weekday: 1.0,
            weekend: 1.5,
        };
        // 木・金・土の3泊
        let price = stay_price(10_000, date(2025, 6, 5), date(2025, 6, 8), &coefs);
        assert_eq!(price, 10_000 + 15_000 + 15_000);
    }

    #[test]
    fn test_stay_price_zero_nights() {
        let coefs = PriceCoefficients::default();
        assert_eq!(stay_price(10_000, date(2025, 6, 5), date(2025, 6, 5), &coefs), 0);
    }

    #[test]
    fn test_coefficients_validation() {
        assert!(PriceCoefficients::default().is_valid());
        assert!(
            !PriceCoefficients {
                weekday: 0.0,
                weekend: 1.0
            }
            .is_valid()
        );
        assert!(
            !PriceCoefficients {
                weekday: 1.0,
                weekend: f64::NAN
            }
            .is_valid()
        );
    }
}
