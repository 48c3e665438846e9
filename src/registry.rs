use crate::adapters::mock::InMemoryStore;
use crate::adapters::postgres::{
    PostgresExtraRepository, PostgresGuestRepository, PostgresHouseRepository,
    PostgresReservationRepository, PostgresVerificationRepository,
};
use crate::ports::{
    ExtraRepository, GuestRepository, HouseRepository, ReservationRepository,
    VerificationRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

/// リポジトリの登録簿
///
/// 未構成のスロットは `None` のまま。検証はユースケースの構築時に行う。
#[derive(Clone, Default)]
pub struct Registry {
    pub reservations: Option<Arc<dyn ReservationRepository>>,
    pub guests: Option<Arc<dyn GuestRepository>>,
    pub houses: Option<Arc<dyn HouseRepository>>,
    pub extras: Option<Arc<dyn ExtraRepository>>,
    pub verification: Option<Arc<dyn VerificationRepository>>,
}

impl Registry {
    /// すべてのスロットを1つのインメモリストアで埋める
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            reservations: Some(store.clone()),
            guests: Some(store.clone()),
            houses: Some(store.clone()),
            extras: Some(store.clone()),
            verification: Some(store),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            reservations: Some(Arc::new(PostgresReservationRepository::new(pool.clone()))),
            guests: Some(Arc::new(PostgresGuestRepository::new(pool.clone()))),
            houses: Some(Arc::new(PostgresHouseRepository::new(pool.clone()))),
            extras: Some(Arc::new(PostgresExtraRepository::new(pool.clone()))),
            verification: Some(Arc::new(PostgresVerificationRepository::new(pool))),
        }
    }
}
