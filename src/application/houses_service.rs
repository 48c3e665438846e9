use crate::domain::{House, HouseId};
use crate::ports::HouseRepository;
use std::sync::Arc;

use super::errors::{CatalogError, UsecaseError};

#[derive(Clone, Default)]
pub struct HousesDependencies {
    pub repo: Option<Arc<dyn HouseRepository>>,
}

/// 宿泊棟ユースケース
pub struct HousesService {
    repo: Arc<dyn HouseRepository>,
}

impl HousesService {
    pub fn new(deps: HousesDependencies) -> Result<Self, UsecaseError> {
        Ok(Self {
            repo: deps
                .repo
                .ok_or(UsecaseError::MissingDependency("house repository"))?,
        })
    }

    pub async fn list(&self) -> Result<Vec<House>, CatalogError> {
        self.repo.list().await.map_err(CatalogError::Repository)
    }

    pub async fn get(&self, house_id: HouseId) -> Result<House, CatalogError> {
        self.repo
            .get(house_id)
            .await
            .map_err(CatalogError::Repository)?
            .ok_or(CatalogError::NotFound)
    }
}
