use crate::domain::{Extra, ExtraId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Catalog of bookable extras (bathhouse slots and similar).
#[async_trait]
pub trait ExtraRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Extra>>;

    async fn get(&self, extra_id: ExtraId) -> Result<Option<Extra>>;
}
