use crate::domain::PriceCoefficients;
use crate::ports::ReservationNotifier;
use crate::registry::Registry;
use std::sync::Arc;

use super::{
    ExtrasDependencies, ExtrasService, HousesDependencies, HousesService, ReservationDependencies,
    ReservationService, UsecaseError, VerificationDependencies, VerificationService,
    verification_ttl,
};

/// アプリケーションのユースケース一式
///
/// 4つすべてが構築できた場合のみ存在する。部分的に初期化された状態は作らない。
#[derive(Clone)]
pub struct Usecases {
    pub reservations: Arc<ReservationService>,
    pub houses: Arc<HousesService>,
    pub extras: Arc<ExtrasService>,
    pub verification: Arc<VerificationService>,
}

impl Usecases {
    /// リポジトリと設定からユースケースを組み立てる
    ///
    /// 最初に失敗したユースケースのエラーをそのまま返す。
    /// 各ユースケースは構築時に互いに依存しないので、順序は結果に影響しない。
    pub fn new(
        registry: &Registry,
        coefficients: PriceCoefficients,
        notifier: Option<Arc<dyn ReservationNotifier>>,
    ) -> Result<Self, UsecaseError> {
        let reservations = ReservationService::new(ReservationDependencies {
            reservation_repo: registry.reservations.clone(),
            guest_repo: registry.guests.clone(),
            house_repo: registry.houses.clone(),
            extra_repo: registry.extras.clone(),
            coefficients,
            notifier,
        })?;

        let houses = HousesService::new(HousesDependencies {
            repo: registry.houses.clone(),
        })?;

        let extras = ExtrasService::new(ExtrasDependencies {
            repo: registry.extras.clone(),
        })?;

        let verification = VerificationService::new(VerificationDependencies {
            repo: registry.verification.clone(),
            ttl: verification_ttl(),
        })?;

        tracing::debug!("Usecases assembled");

        Ok(Self {
            reservations: Arc::new(reservations),
            houses: Arc::new(houses),
            extras: Arc::new(extras),
            verification: Arc::new(verification),
        })
    }
}
