use crate::application::Usecases;
use crate::domain::{Extra, House};
use crate::telegram::QueryHandler;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        ConfirmVerificationRequest, CreateReservationRequest, ReservationCreatedResponse,
        VerificationConfirmedResponse,
    },
    webhook::{SECRET_TOKEN_HEADER, Update, secret_matches},
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub usecases: Usecases,
    pub query_handler: Arc<QueryHandler>,
    /// 設定されていればWebhookのヘッダーと照合する
    pub webhook_secret: Option<String>,
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /reservations - 宿泊棟を予約する
///
/// 認証コードがあれば先に消費し、確認できたチャットだけを予約に紐づける。
/// 予約の保存後、管理者とゲスト（チャットが紐づいていれば）に通知する。
/// 通知の失敗は予約の結果に影響しない。
pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationCreatedResponse>), ApiError> {
    let now = chrono::Utc::now();

    let telegram_chat_id = match req.verification_code() {
        Some(code) => Some(state.usecases.verification.verify(code, now).await?),
        None => None,
    };

    let reservation = state
        .usecases
        .reservations
        .create(req.to_command(telegram_chat_id), now)
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// POST /verification/confirm - 認証コードを確認する
///
/// コードは一度きり。発行から1時間で失効する。
pub async fn confirm_verification(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfirmVerificationRequest>,
) -> Result<Json<VerificationConfirmedResponse>, ApiError> {
    let chat_id = state
        .usecases
        .verification
        .verify(req.code.trim(), chrono::Utc::now())
        .await?;

    Ok(Json(VerificationConfirmedResponse {
        telegram_chat_id: chat_id.value(),
    }))
}

/// POST /telegram/webhook - Telegramからの更新を処理する
///
/// 応答はすべてボット経由で返すので、処理結果にかかわらず200を返す。
/// 非200を返すとTelegramが同じ更新を再送してくる。
pub async fn telegram_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> Result<StatusCode, ApiError> {
    if let Some(expected) = &state.webhook_secret {
        let provided = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if !secret_matches(expected, provided) {
            tracing::warn!(update_id = update.update_id, "Webhook secret mismatch");
            return Err(ApiError::Unauthorized);
        }
    }

    let update_id = update.update_id;
    match update.into_interaction() {
        Some(interaction) => state.query_handler.handle(interaction).await,
        None => tracing::debug!(update_id, "Ignoring update"),
    }

    Ok(StatusCode::OK)
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /houses - 宿泊棟の一覧
pub async fn list_houses(State(state): State<Arc<AppState>>) -> Result<Json<Vec<House>>, ApiError> {
    Ok(Json(state.usecases.houses.list().await?))
}

/// GET /extras - 追加サービスの一覧（選択肢を含む）
pub async fn list_extras(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Extra>>, ApiError> {
    Ok(Json(state.usecases.extras.list().await?))
}
