use crate::domain::{ChatId, ReservationCreatedMessage};
use async_trait::async_trait;
use thiserror::Error;

use super::chat_transport::TransportError;

/// 通知のエラー
#[derive(Debug, Error)]
pub enum NotifyError {
    /// 単一宛先への送信失敗
    #[error("Failed to deliver notification to chat {chat_id}")]
    Delivery {
        chat_id: ChatId,
        #[source]
        source: TransportError,
    },

    /// 複数宛先のうち一部（または全部）に届かなかった
    #[error("{delivered} of {total} delivered, failed recipients: {failed:?}")]
    PartialDelivery {
        delivered: usize,
        total: usize,
        failed: Vec<ChatId>,
    },
}

/// 予約通知ポート
///
/// 予約ユースケースから見た通知の出口。配信手段（Telegramなど）を抽象化する。
#[async_trait]
pub trait ReservationNotifier: Send + Sync {
    /// 運営者全員に新規予約を通知する
    async fn reservation_created_for_admin(
        &self,
        message: &ReservationCreatedMessage,
    ) -> Result<(), NotifyError>;

    /// 予約したゲスト本人に確認を送る
    async fn reservation_created_for_guest(
        &self,
        message: &ReservationCreatedMessage,
        chat_id: ChatId,
    ) -> Result<(), NotifyError>;
}
