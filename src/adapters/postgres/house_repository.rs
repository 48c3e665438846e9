use crate::domain::{House, HouseId};
use crate::ports::house_repository::{HouseRepository as HouseRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::reservation_repository::to_u32;

fn map_row_to_house(row: &PgRow) -> Result<House> {
    Ok(House {
        id: HouseId::new(row.get("id")),
        name: row.get("name"),
        description: row.get("description"),
        base_price: row.get("base_price"),
        capacity: to_u32(row.get("capacity"), "capacity")?,
        image_url: row.get("image_url"),
    })
}

/// HouseRepositoryのPostgreSQL実装
pub struct HouseRepository {
    pool: PgPool,
}

impl HouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HouseRepositoryTrait for HouseRepository {
    async fn list(&self) -> Result<Vec<House>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, base_price, capacity, image_url
            FROM houses
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_house).collect()
    }

    async fn get(&self, house_id: HouseId) -> Result<Option<House>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, base_price, capacity, image_url
            FROM houses
            WHERE id = $1
            "#,
        )
        .bind(house_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_house).transpose()
    }
}
