pub mod mock;
pub mod postgres;
pub mod telegram_api;
