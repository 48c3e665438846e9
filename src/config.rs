use crate::domain::{ChatId, PriceCoefficients};
use crate::telegram::{BotConfig, DEFAULT_SEND_TIMEOUT};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CONTACT_PHONE: &str = "+79867427283";

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// アプリケーション設定
///
/// 環境変数から読み込む。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 未設定ならインメモリストアで起動する
    pub database_url: Option<String>,
    pub port: u16,
    pub telegram_bot_token: String,
    pub telegram_admin_chat_ids: Vec<ChatId>,
    /// Webhookの `X-Telegram-Bot-Api-Secret-Token` と照合する
    pub telegram_webhook_secret: Option<String>,
    pub telegram_send_timeout: Duration,
    pub contact_phone: String,
    pub price_coefficients: PriceCoefficients,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の取得関数から読み込む（テスト用）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let telegram_bot_token =
            get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let telegram_admin_chat_ids = match get("TELEGRAM_ADMIN_CHAT_IDS") {
            Some(raw) => parse_chat_ids(&raw)?,
            None => Vec::new(),
        };

        let timeout_secs: u64 = parse_or(
            "TELEGRAM_SEND_TIMEOUT_SECS",
            get("TELEGRAM_SEND_TIMEOUT_SECS"),
            DEFAULT_SEND_TIMEOUT.as_secs(),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "TELEGRAM_SEND_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            database_url: get("DATABASE_URL"),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            telegram_bot_token,
            telegram_admin_chat_ids,
            telegram_webhook_secret: get("TELEGRAM_WEBHOOK_SECRET"),
            telegram_send_timeout: Duration::from_secs(timeout_secs),
            contact_phone: get("CONTACT_PHONE").unwrap_or_else(|| DEFAULT_CONTACT_PHONE.to_string()),
            price_coefficients: PriceCoefficients {
                weekday: parse_or("PRICE_WEEKDAY_COEF", get("PRICE_WEEKDAY_COEF"), 1.0)?,
                weekend: parse_or("PRICE_WEEKEND_COEF", get("PRICE_WEEKEND_COEF"), 1.0)?,
            },
        })
    }

    pub fn bot_config(&self) -> BotConfig {
        BotConfig::new(
            self.telegram_admin_chat_ids.clone(),
            self.contact_phone.clone(),
            self.telegram_send_timeout,
        )
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// "123, -100456" のようなカンマ区切りのチャットID
fn parse_chat_ids(raw: &str) -> Result<Vec<ChatId>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map(ChatId::new)
                .map_err(|_| ConfigError::Invalid {
                    key: "TELEGRAM_ADMIN_CHAT_IDS",
                    value: s.to_string(),
                })
        })
        .collect()
}
