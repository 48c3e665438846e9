use crate::domain::{Extra, ExtraId, FillOption};
use crate::ports::extra_repository::{ExtraRepository as ExtraRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;

/// ExtraRepositoryのPostgreSQL実装
///
/// extras と extra_fill_options を LEFT JOIN して1回のクエリで組み立てる。
pub struct ExtraRepository {
    pool: PgPool,
}

impl ExtraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load(&self, extra_id: Option<ExtraId>) -> Result<Vec<Extra>> {
        let rows = sqlx::query(
            r#"
            SELECT
                e.id,
                e.name,
                e.price,
                o.id AS option_id,
                o.name AS option_name,
                o.price AS option_price
            FROM extras e
            LEFT JOIN extra_fill_options o ON o.extra_id = e.id
            WHERE $1::BIGINT IS NULL OR e.id = $1
            ORDER BY e.id ASC, o.id ASC
            "#,
        )
        .bind(extra_id.map(|id| id.value()))
        .fetch_all(&self.pool)
        .await?;

        let mut extras: BTreeMap<i64, Extra> = BTreeMap::new();
        for row in &rows {
            let id: i64 = row.get("id");
            let extra = extras.entry(id).or_insert_with(|| Extra {
                id: ExtraId::new(id),
                name: row.get("name"),
                price: row.get("price"),
                fill_options: Vec::new(),
            });

            if let Some(option_id) = row.get::<Option<i64>, _>("option_id") {
                extra.fill_options.push(FillOption {
                    id: option_id,
                    name: row.get("option_name"),
                    price: row.get("option_price"),
                });
            }
        }

        Ok(extras.into_values().collect())
    }
}

#[async_trait]
impl ExtraRepositoryTrait for ExtraRepository {
    async fn list(&self) -> Result<Vec<Extra>> {
        self.load(None).await
    }

    async fn get(&self, extra_id: ExtraId) -> Result<Option<Extra>> {
        Ok(self.load(Some(extra_id)).await?.into_iter().next())
    }
}
