use crate::domain::{ExtraId, HouseId, ReservationRuleError};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// ユースケース構築時のエラー
///
/// 起動時に発生し、致命的。サービスは起動しない。
#[derive(Debug, Error)]
pub enum UsecaseError {
    /// 必須の依存が渡されていない
    #[error("Missing dependency: {0}")]
    MissingDependency(&'static str),

    /// 設定値が不正（TTLが0以下など）
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// 予約ユースケースのエラー
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("House {} not found", .0.value())]
    HouseNotFound(HouseId),

    #[error("Extra {} not found", .0.value())]
    ExtraNotFound(ExtraId),

    #[error("Fill option {fill_option_id} is not available for extra {}", .extra_id.value())]
    FillOptionNotFound { extra_id: ExtraId, fill_option_id: i64 },

    /// ビジネスルール違反
    #[error("Reservation rejected: {0:?}")]
    Rule(ReservationRuleError),

    #[error("Repository error")]
    Repository(#[source] BoxError),
}

impl From<ReservationRuleError> for ReservationError {
    fn from(err: ReservationRuleError) -> Self {
        ReservationError::Rule(err)
    }
}

/// 宿泊棟・追加サービス照会のエラー
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Not found")]
    NotFound,

    #[error("Repository error")]
    Repository(#[source] BoxError),
}

/// 認証ユースケースのエラー
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Verification code not found")]
    NotFound,

    /// 有効期限切れ
    #[error("Verification code expired")]
    Expired,

    /// 発行のたびに有効なコードと衝突した
    #[error("No free verification code after {0} attempts")]
    Exhausted(usize),

    #[error("Repository error")]
    Repository(#[source] BoxError),
}
