use crate::domain::ReservationId;
use thiserror::Error;
use uuid::Uuid;

/// 予約詳細ボタンのコールバックデータの接頭辞
pub const VIEW_RESERVATION_PREFIX: &str = "view_resv_";

/// 解釈できないコールバックデータ
///
/// 呼び出し側は「予約が見つからない」として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid callback token: {0:?}")]
pub struct InvalidCallbackToken(pub String);

/// 予約IDをコールバックデータに変換する
pub fn encode(reservation_id: ReservationId) -> String {
    format!("{VIEW_RESERVATION_PREFIX}{}", reservation_id.value())
}

/// コールバックデータから予約IDを取り出す
///
/// 接頭辞がない、またはUUIDとして不正な場合はエラー。
pub fn decode(token: &str) -> Result<ReservationId, InvalidCallbackToken> {
    token
        .strip_prefix(VIEW_RESERVATION_PREFIX)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .map(ReservationId::from_uuid)
        .ok_or_else(|| InvalidCallbackToken(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_format() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let token = encode(ReservationId::from_uuid(uuid));
        assert_eq!(token, "view_resv_67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_decode_roundtrip() {
        let id = ReservationId::new();
        assert_eq!(decode(&encode(id)), Ok(id));
    }

    #[test]
    fn test_decode_rejects_missing_prefix() {
        let uuid = Uuid::new_v4().to_string();
        assert!(decode(&uuid).is_err());
        assert!(decode("").is_err());
        assert!(decode(&format!("edit_resv_{uuid}")).is_err());
    }

    #[test]
    fn test_decode_rejects_malformed_uuid() {
        assert!(decode("view_resv_").is_err());
        assert!(decode("view_resv_42").is_err());
        assert!(decode("view_resv_not-a-uuid").is_err());
    }

    #[test]
    fn test_callback_data_fits_telegram_limit() {
        // Telegram は callback_data を64バイトまでに制限している
        assert!(encode(ReservationId::new()).len() <= 64);
    }
}
