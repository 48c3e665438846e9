use crate::domain::ChatId;
use crate::ports::{
    CallbackAnswer, ChatTransport, InlineButton, OutboundMessage, OutboundPhoto, QueryError,
    ReservationQuery, TransportError, VerificationIssuer,
};
use std::sync::Arc;

use super::{BotConfig, bounded, callback, render};

/// チャットからの操作1件
///
/// 必要な文脈はすべてこの値に含まれる。サーバー側のセッションは持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInteraction {
    /// /start
    Start { chat_id: ChatId },
    /// 「自分の予約」一覧
    ListReservations { chat_id: ChatId },
    /// /verify: サイトでの予約にチャットを紐づけるための認証コード
    RequestCode { chat_id: ChatId },
    /// 一覧のボタンが押された
    ViewReservation {
        chat_id: ChatId,
        callback_id: String,
        data: String,
    },
}

/// 予約照会ハンドラー
///
/// どの分岐でも、応答先があれば必ず何かを返す。
/// 送信失敗はログに残すだけでリトライしない。
pub struct QueryHandler {
    transport: Arc<dyn ChatTransport>,
    query: Arc<dyn ReservationQuery>,
    issuer: Arc<dyn VerificationIssuer>,
    config: Arc<BotConfig>,
}

impl QueryHandler {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        query: Arc<dyn ReservationQuery>,
        issuer: Arc<dyn VerificationIssuer>,
        config: Arc<BotConfig>,
    ) -> Self {
        Self {
            transport,
            query,
            issuer,
            config,
        }
    }

    pub async fn handle(&self, interaction: ChatInteraction) {
        match interaction {
            ChatInteraction::Start { chat_id } => {
                self.reply(OutboundMessage::text(chat_id, render::GREETING))
                    .await;
            }
            ChatInteraction::ListReservations { chat_id } => {
                self.list_reservations(chat_id).await;
            }
            ChatInteraction::RequestCode { chat_id } => {
                self.send_code(chat_id).await;
            }
            ChatInteraction::ViewReservation {
                chat_id,
                callback_id,
                data,
            } => {
                self.view_reservation(chat_id, callback_id, &data).await;
            }
        }
    }

    async fn list_reservations(&self, chat_id: ChatId) {
        let limit = self.config.send_timeout();
        let reservations = match tokio::time::timeout(limit, self.query.list_by_chat(chat_id)).await
        {
            Ok(Ok(reservations)) => reservations,
            Ok(Err(e)) => {
                tracing::error!(%chat_id, error = %e, "Failed to list reservations");
                self.reply(OutboundMessage::text(chat_id, render::LIST_UNAVAILABLE))
                    .await;
                return;
            }
            Err(_) => {
                tracing::error!(%chat_id, ?limit, "Listing reservations timed out");
                self.reply(OutboundMessage::text(chat_id, render::LIST_UNAVAILABLE))
                    .await;
                return;
            }
        };

        if reservations.is_empty() {
            self.reply(OutboundMessage::text(chat_id, render::LIST_EMPTY))
                .await;
            return;
        }

        let rows = reservations
            .iter()
            .map(|summary| {
                vec![InlineButton {
                    text: render::render_summary_button(summary),
                    callback_data: callback::encode(summary.id),
                }]
            })
            .collect();

        self.reply(OutboundMessage::text(chat_id, render::LIST_HEADER).with_keyboard(rows))
            .await;
    }

    /// コードは要求したチャットにだけ送る
    async fn send_code(&self, chat_id: ChatId) {
        let limit = self.config.send_timeout();
        let text = match tokio::time::timeout(limit, self.issuer.issue_for_chat(chat_id)).await {
            Ok(Ok(code)) => render::render_verification_code(&code),
            Ok(Err(e)) => {
                tracing::error!(%chat_id, error = %e, "Failed to issue verification code");
                render::CODE_UNAVAILABLE.to_string()
            }
            Err(_) => {
                tracing::error!(%chat_id, ?limit, "Issuing verification code timed out");
                render::CODE_UNAVAILABLE.to_string()
            }
        };

        self.reply(OutboundMessage::text(chat_id, text)).await;
    }

    async fn view_reservation(&self, chat_id: ChatId, callback_id: String, data: &str) {
        let reservation_id = match callback::decode(data) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(%chat_id, error = %e, "Rejected callback data");
                self.not_found(callback_id).await;
                return;
            }
        };

        let limit = self.config.send_timeout();
        let detail =
            match tokio::time::timeout(limit, self.query.detail(chat_id, reservation_id)).await {
                Ok(Ok(detail)) => detail,
                Ok(Err(QueryError::NotFound)) => {
                    tracing::info!(%chat_id, %reservation_id, "Reservation not found for chat");
                    self.not_found(callback_id).await;
                    return;
                }
                Ok(Err(e)) => {
                    tracing::error!(%chat_id, %reservation_id, error = %e, "Failed to load reservation");
                    self.not_found(callback_id).await;
                    return;
                }
                Err(_) => {
                    tracing::error!(%chat_id, %reservation_id, ?limit, "Loading reservation timed out");
                    self.not_found(callback_id).await;
                    return;
                }
            };

        self.answer(CallbackAnswer {
            callback_id,
            text: None,
            show_alert: false,
        })
        .await;

        let caption = render::render_detail(&detail);

        if detail.image_url.is_empty() {
            self.reply(OutboundMessage::text(chat_id, caption)).await;
            return;
        }

        let photo = OutboundPhoto {
            chat_id,
            photo: detail.image_url.clone(),
            caption: caption.clone(),
        };
        if let Err(e) = self.call(self.transport.send_photo(photo)).await {
            // 画像が壊れていても詳細は届ける
            tracing::warn!(%chat_id, %reservation_id, error = %e, "Failed to send reservation photo");
            self.reply(OutboundMessage::text(chat_id, caption)).await;
        }
    }

    async fn not_found(&self, callback_id: String) {
        self.answer(CallbackAnswer {
            callback_id,
            text: Some(render::RESERVATION_NOT_FOUND.to_string()),
            show_alert: true,
        })
        .await;
    }

    async fn reply(&self, message: OutboundMessage) {
        let chat_id = message.chat_id;
        if let Err(e) = self.call(self.transport.send_message(message)).await {
            tracing::error!(%chat_id, error = %e, "Failed to send reply");
        }
    }

    async fn answer(&self, answer: CallbackAnswer) {
        if let Err(e) = self.call(self.transport.answer_callback(answer)).await {
            tracing::error!(error = %e, "Failed to answer callback query");
        }
    }

    async fn call<F>(&self, call: F) -> Result<(), TransportError>
    where
        F: std::future::Future<Output = Result<(), TransportError>>,
    {
        bounded(self.config.send_timeout(), call).await
    }
}
