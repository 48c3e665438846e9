use crate::domain::{ChatId, Reservation, ReservationDetail, ReservationId, ReservationSummary};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約リポジトリポート
///
/// 書き込みと、ゲスト本人向けの読み取りビューを提供する。
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// 予約を保存する
    async fn insert(&self, reservation: &Reservation) -> Result<()>;

    /// Telegramチャットに紐づくゲストの予約一覧
    ///
    /// チェックイン日の昇順。
    async fn find_summaries_by_chat(&self, chat_id: ChatId) -> Result<Vec<ReservationSummary>>;

    /// 予約詳細を取得する
    ///
    /// 予約がそのチャットのゲストに属していない場合は `None`。
    async fn find_detail_for_chat(
        &self,
        chat_id: ChatId,
        reservation_id: ReservationId,
    ) -> Result<Option<ReservationDetail>>;
}
