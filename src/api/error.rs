use crate::application::{CatalogError, ReservationError, VerificationError};
use crate::domain::ReservationRuleError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Reservation(ReservationError),
    Catalog(CatalogError),
    Verification(VerificationError),
    /// Webhookのシークレット不一致
    Unauthorized,
}

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        ApiError::Reservation(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        ApiError::Verification(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            // 404 Not Found
            ApiError::Reservation(ReservationError::HouseNotFound(id)) => (
                StatusCode::NOT_FOUND,
                "HOUSE_NOT_FOUND",
                format!("House {} not found", id.value()),
            ),
            ApiError::Catalog(CatalogError::NotFound) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Not found".to_string())
            }
            ApiError::Verification(VerificationError::NotFound) => (
                StatusCode::NOT_FOUND,
                "CODE_NOT_FOUND",
                "Verification code not found".to_string(),
            ),

            // 410 Gone - 期限切れのコードは再発行が必要
            ApiError::Verification(VerificationError::Expired) => (
                StatusCode::GONE,
                "CODE_EXPIRED",
                "Verification code expired".to_string(),
            ),

            // 422 Unprocessable Entity - ビジネスルール違反
            ApiError::Reservation(ref err @ ReservationError::ExtraNotFound(_))
            | ApiError::Reservation(ref err @ ReservationError::FillOptionNotFound { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRA_NOT_AVAILABLE",
                err.to_string(),
            ),
            ApiError::Reservation(ReservationError::Rule(rule)) => {
                let (error_type, message) = match rule {
                    ReservationRuleError::InvalidDates => (
                        "INVALID_DATES",
                        "Check-out must be after check-in".to_string(),
                    ),
                    ReservationRuleError::NoGuests => {
                        ("NO_GUESTS", "At least one guest is required".to_string())
                    }
                    ReservationRuleError::CapacityExceeded {
                        capacity,
                        requested,
                    } => (
                        "CAPACITY_EXCEEDED",
                        format!("House fits {} guests, {} requested", capacity, requested),
                    ),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, error_type, message)
            }

            ApiError::Verification(ref err @ VerificationError::Exhausted(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CODE_UNAVAILABLE",
                err.to_string(),
            ),

            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid secret token".to_string(),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Reservation(ReservationError::Repository(e))
            | ApiError::Catalog(CatalogError::Repository(e))
            | ApiError::Verification(VerificationError::Repository(e)) => {
                tracing::error!("Repository error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
