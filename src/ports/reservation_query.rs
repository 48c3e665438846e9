use crate::domain::{ChatId, ReservationDetail, ReservationId, ReservationSummary};
use async_trait::async_trait;
use thiserror::Error;

/// 予約照会のエラー
#[derive(Debug, Error)]
pub enum QueryError {
    /// 存在しない、または要求元チャットの予約ではない
    #[error("Reservation not found")]
    NotFound,

    #[error("Reservation query backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// 予約照会ポート
///
/// チャットボットから自分の予約を閲覧するための読み取りインターフェース。
/// 所有者チェックは呼び出しのたびにこのポート側で行う。
#[async_trait]
pub trait ReservationQuery: Send + Sync {
    async fn list_by_chat(&self, chat_id: ChatId) -> Result<Vec<ReservationSummary>, QueryError>;

    async fn detail(
        &self,
        chat_id: ChatId,
        reservation_id: ReservationId,
    ) -> Result<ReservationDetail, QueryError>;
}
