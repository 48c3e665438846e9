use crate::domain::{House, HouseId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Houses catalog port.
#[async_trait]
pub trait HouseRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<House>>;

    async fn get(&self, house_id: HouseId) -> Result<Option<House>>;
}
