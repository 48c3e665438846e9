use crate::domain::commands::{CreateReservation, ExtraRequest};
use crate::domain::{
    self, ChatId, ExtraBooking, Guest, GuestId, PriceCoefficients, Reservation, ReservationDetail,
    ReservationId, ReservationSummary, StayRequest,
};
use crate::ports::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::errors::{ReservationError, UsecaseError};

/// 予約ユースケースの依存関係
///
/// 未設定の依存は `None`。検証は `ReservationService::new` が行う。
#[derive(Clone, Default)]
pub struct ReservationDependencies {
    pub reservation_repo: Option<Arc<dyn ReservationRepository>>,
    pub guest_repo: Option<Arc<dyn GuestRepository>>,
    pub house_repo: Option<Arc<dyn HouseRepository>>,
    pub extra_repo: Option<Arc<dyn ExtraRepository>>,
    pub coefficients: PriceCoefficients,
    pub notifier: Option<Arc<dyn ReservationNotifier>>,
}

/// 予約ユースケース
pub struct ReservationService {
    reservation_repo: Arc<dyn ReservationRepository>,
    guest_repo: Arc<dyn GuestRepository>,
    house_repo: Arc<dyn HouseRepository>,
    extra_repo: Arc<dyn ExtraRepository>,
    coefficients: PriceCoefficients,
    notifier: Arc<dyn ReservationNotifier>,
}

impl ReservationService {
    pub fn new(deps: ReservationDependencies) -> Result<Self, UsecaseError> {
        if !deps.coefficients.is_valid() {
            return Err(UsecaseError::InvalidConfiguration(format!(
                "price coefficients must be positive: {:?}",
                deps.coefficients
            )));
        }

        Ok(Self {
            reservation_repo: deps
                .reservation_repo
                .ok_or(UsecaseError::MissingDependency("reservation repository"))?,
            guest_repo: deps
                .guest_repo
                .ok_or(UsecaseError::MissingDependency("guest repository"))?,
            house_repo: deps
                .house_repo
                .ok_or(UsecaseError::MissingDependency("house repository"))?,
            extra_repo: deps
                .extra_repo
                .ok_or(UsecaseError::MissingDependency("extra repository"))?,
            coefficients: deps.coefficients,
            notifier: deps
                .notifier
                .ok_or(UsecaseError::MissingDependency("reservation notifier"))?,
        })
    }

    /// 予約を作成する
    ///
    /// ビジネスルール：
    /// - 宿泊棟と追加サービスが存在すること
    /// - 日付・人数のルールは `domain::reservation::book_house` を参照
    ///
    /// 保存後に運営者とゲスト（Telegram連携済みの場合）へ通知する。
    /// 通知はベストエフォートで、失敗しても予約は成立する。
    pub async fn create(
        &self,
        cmd: CreateReservation,
        now: DateTime<Utc>,
    ) -> Result<Reservation, ReservationError> {
        // 1. 宿泊棟
        let house = self
            .house_repo
            .get(cmd.house_id)
            .await
            .map_err(ReservationError::Repository)?
            .ok_or(ReservationError::HouseNotFound(cmd.house_id))?;

        // 2. 追加サービス
        let mut extras = Vec::with_capacity(cmd.extras.len());
        for request in &cmd.extras {
            extras.push(self.resolve_extra(request).await?);
        }

        // 3. ゲスト（電話番号で既存ゲストを引き継ぐ）
        let guest = self.resolve_guest(&cmd).await?;

        // 4. ドメイン層の純粋関数
        let stay = StayRequest {
            check_in: cmd.check_in,
            check_out: cmd.check_out,
            guests_count: cmd.guests_count,
        };
        let (reservation, message) =
            domain::reservation::book_house(&house, &guest, &stay, extras, &self.coefficients, now)?;

        // 5. 保存
        self.guest_repo
            .save(&guest)
            .await
            .map_err(ReservationError::Repository)?;
        self.reservation_repo
            .insert(&reservation)
            .await
            .map_err(ReservationError::Repository)?;

        tracing::info!(
            reservation_id = %reservation.id,
            house_id = house.id.value(),
            total_price = reservation.total_price,
            "Reservation created"
        );

        // 6. 通知
        if let Err(e) = self.notifier.reservation_created_for_admin(&message).await {
            tracing::warn!(reservation_id = %reservation.id, error = %e, "Admin notification incomplete");
        }
        if let Some(chat_id) = guest.telegram_chat_id {
            if let Err(e) = self
                .notifier
                .reservation_created_for_guest(&message, chat_id)
                .await
            {
                tracing::warn!(reservation_id = %reservation.id, error = %e, "Guest notification failed");
            }
        }

        Ok(reservation)
    }

    async fn resolve_extra(&self, request: &ExtraRequest) -> Result<ExtraBooking, ReservationError> {
        let extra = self
            .extra_repo
            .get(request.extra_id)
            .await
            .map_err(ReservationError::Repository)?
            .ok_or(ReservationError::ExtraNotFound(request.extra_id))?;

        let fill = match request.fill_option_id {
            Some(fill_option_id) => Some(extra.fill_option(fill_option_id).cloned().ok_or(
                ReservationError::FillOptionNotFound {
                    extra_id: extra.id,
                    fill_option_id,
                },
            )?),
            None => None,
        };

        Ok(ExtraBooking {
            extra_id: extra.id,
            name: extra.name.clone(),
            date: request.date,
            time_from: request.time_from.clone(),
            time_to: request.time_to.clone(),
            price: extra.price + fill.as_ref().map_or(0, |f| f.price),
            fill_option: fill.map(|f| f.name),
        })
    }

    /// 電話番号で既存ゲストを引き継ぐ
    ///
    /// 既存ゲストの記録（名前、紐づけ済みのチャット）は書き換えない。
    /// チャットが未設定の場合だけ、確認済みのチャットを紐づける。
    async fn resolve_guest(&self, cmd: &CreateReservation) -> Result<Guest, ReservationError> {
        let existing = self
            .guest_repo
            .find_by_phone(&cmd.guest_phone)
            .await
            .map_err(ReservationError::Repository)?;

        Ok(match existing {
            Some(guest) => {
                if matches!(
                    (guest.telegram_chat_id, cmd.telegram_chat_id),
                    (Some(linked), Some(offered)) if linked != offered
                ) {
                    tracing::warn!(guest_id = %guest.id, "Guest is linked to another chat, keeping the existing link");
                }
                Guest {
                    telegram_chat_id: guest.telegram_chat_id.or(cmd.telegram_chat_id),
                    ..guest
                }
            }
            None => Guest {
                id: GuestId::new(),
                name: cmd.guest_name.clone(),
                phone: cmd.guest_phone.clone(),
                telegram_chat_id: cmd.telegram_chat_id,
            },
        })
    }
}

#[async_trait]
impl ReservationQuery for ReservationService {
    async fn list_by_chat(&self, chat_id: ChatId) -> Result<Vec<ReservationSummary>, QueryError> {
        self.reservation_repo
            .find_summaries_by_chat(chat_id)
            .await
            .map_err(QueryError::Backend)
    }

    async fn detail(
        &self,
        chat_id: ChatId,
        reservation_id: ReservationId,
    ) -> Result<ReservationDetail, QueryError> {
        self.reservation_repo
            .find_detail_for_chat(chat_id, reservation_id)
            .await
            .map_err(QueryError::Backend)?
            .ok_or(QueryError::NotFound)
    }
}
