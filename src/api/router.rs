use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, confirm_verification, create_reservation, list_extras, list_houses,
    telegram_webhook,
};

/// Creates the API router
///
/// - GET /houses, GET /extras - catalog
/// - POST /reservations - book a house
/// - POST /verification/confirm - redeem a chat verification code
/// - POST /telegram/webhook - bot updates
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/houses", get(list_houses))
        .route("/extras", get(list_extras))
        .route("/reservations", post(create_reservation))
        .route("/verification/confirm", post(confirm_verification))
        .route("/telegram/webhook", post(telegram_webhook))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
