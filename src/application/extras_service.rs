use crate::domain::Extra;
use crate::ports::ExtraRepository;
use std::sync::Arc;

use super::errors::{CatalogError, UsecaseError};

#[derive(Clone, Default)]
pub struct ExtrasDependencies {
    pub repo: Option<Arc<dyn ExtraRepository>>,
}

/// 追加サービスユースケース
pub struct ExtrasService {
    repo: Arc<dyn ExtraRepository>,
}

impl ExtrasService {
    pub fn new(deps: ExtrasDependencies) -> Result<Self, UsecaseError> {
        Ok(Self {
            repo: deps
                .repo
                .ok_or(UsecaseError::MissingDependency("extra repository"))?,
        })
    }

    /// 予約可能な追加サービス（オプション込み）
    pub async fn list(&self) -> Result<Vec<Extra>, CatalogError> {
        self.repo.list().await.map_err(CatalogError::Repository)
    }
}
