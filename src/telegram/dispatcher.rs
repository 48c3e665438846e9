use crate::domain::{ChatId, ReservationCreatedMessage};
use crate::ports::{ChatTransport, NotifyError, OutboundMessage, ReservationNotifier, TransportError};
use async_trait::async_trait;
use std::sync::Arc;

use super::{BotConfig, bounded, render};

/// 複数宛先への配信結果
///
/// 宛先ごとに (宛先, 結果) を保持する。
#[derive(Debug, Default)]
pub struct DeliveryReport {
    outcomes: Vec<(ChatId, Result<(), TransportError>)>,
}

impl DeliveryReport {
    pub fn outcomes(&self) -> &[(ChatId, Result<(), TransportError>)] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|(_, r)| r.is_ok()).count()
    }

    /// 送信に失敗した宛先（送信順）
    pub fn failed_recipients(&self) -> Vec<ChatId> {
        self.outcomes
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(chat_id, _)| *chat_id)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|(_, r)| r.is_ok())
    }

    /// 1件でも失敗があれば `NotifyError::PartialDelivery`
    pub fn into_result(self) -> Result<(), NotifyError> {
        if self.is_complete() {
            return Ok(());
        }
        Err(NotifyError::PartialDelivery {
            delivered: self.delivered(),
            total: self.total(),
            failed: self.failed_recipients(),
        })
    }
}

/// 通知ディスパッチャー
///
/// 予約イベントを整形し、運営者（複数）またはゲスト（1人）に送る。
/// 宛先ごとに1回だけ送信を試み、リトライはしない。
pub struct NotificationDispatcher {
    transport: Arc<dyn ChatTransport>,
    config: Arc<BotConfig>,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn ChatTransport>, config: Arc<BotConfig>) -> Self {
        Self { transport, config }
    }

    /// 運営者全員に通知する
    ///
    /// 本文は1回だけ整形する。ある宛先への送信が失敗しても、
    /// 残りの宛先への送信は必ず試みる。
    pub async fn notify_operators(&self, message: &ReservationCreatedMessage) -> DeliveryReport {
        let text = render::render_admin_notification(message);
        let recipients = self.config.admin_chat_ids();

        if recipients.is_empty() {
            tracing::warn!(
                reservation_id = %message.reservation_id,
                "No operator chats configured, skipping admin notification"
            );
        }

        let mut report = DeliveryReport {
            outcomes: Vec::with_capacity(recipients.len()),
        };

        for &chat_id in recipients {
            let outcome = self
                .send(OutboundMessage::text(chat_id, text.clone()))
                .await;
            if let Err(e) = &outcome {
                tracing::warn!(%chat_id, error = %e, "Failed to notify operator");
            }
            report.outcomes.push((chat_id, outcome));
        }

        tracing::info!(
            reservation_id = %message.reservation_id,
            delivered = report.delivered(),
            total = report.total(),
            "Operator notification finished"
        );

        report
    }

    /// 予約したゲストに確認を送る
    pub async fn notify_guest(
        &self,
        message: &ReservationCreatedMessage,
        chat_id: ChatId,
    ) -> Result<(), NotifyError> {
        let text = render::render_user_notification(message, self.config.contact_phone());

        self.send(OutboundMessage::text(chat_id, text))
            .await
            .map_err(|source| NotifyError::Delivery { chat_id, source })
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError> {
        bounded(
            self.config.send_timeout(),
            self.transport.send_message(message),
        )
        .await
    }
}

#[async_trait]
impl ReservationNotifier for NotificationDispatcher {
    async fn reservation_created_for_admin(
        &self,
        message: &ReservationCreatedMessage,
    ) -> Result<(), NotifyError> {
        self.notify_operators(message).await.into_result()
    }

    async fn reservation_created_for_guest(
        &self,
        message: &ReservationCreatedMessage,
        chat_id: ChatId,
    ) -> Result<(), NotifyError> {
        self.notify_guest(message, chat_id).await
    }
}
