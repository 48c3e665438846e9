use quiet_groove::{
    adapters::{mock::InMemoryStore, telegram_api::TelegramClient},
    api::{handlers::AppState, router::create_router},
    application::Usecases,
    config::AppConfig,
    registry::Registry,
    telegram::{NotificationDispatcher, QueryHandler},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quiet_groove=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Storage: PostgreSQL when configured, otherwise an empty in-memory store
    let registry = match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Connected to PostgreSQL");
            Registry::postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, using in-memory storage");
            Registry::in_memory(Arc::new(InMemoryStore::new()))
        }
    };

    // Telegram bot
    let bot_config = Arc::new(config.bot_config());
    if bot_config.admin_chat_ids().is_empty() {
        tracing::warn!("TELEGRAM_ADMIN_CHAT_IDS is empty, operators will not be notified");
    }
    let transport = Arc::new(TelegramClient::new(
        &config.telegram_bot_token,
        config.telegram_send_timeout,
    )?);
    let dispatcher = Arc::new(NotificationDispatcher::new(
        transport.clone(),
        bot_config.clone(),
    ));

    // 4つのユースケースがすべて構築できなければ起動しない
    let usecases = Usecases::new(&registry, config.price_coefficients, Some(dispatcher))?;

    let query_handler = Arc::new(QueryHandler::new(
        transport,
        usecases.reservations.clone(),
        usecases.verification.clone(),
        bot_config,
    ));

    // Create application state
    let app_state = Arc::new(AppState {
        usecases,
        query_handler,
        webhook_secret: config.telegram_webhook_secret.clone(),
    });

    // Create router
    let app = create_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
