use crate::domain::{ChatId, Guest, GuestId};
use crate::ports::guest_repository::{GuestRepository as GuestRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// GuestRepositoryのPostgreSQL実装
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepositoryTrait for GuestRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Guest>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, phone, telegram_chat_id
            FROM guests
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Guest {
            id: GuestId::from_uuid(row.get("id")),
            name: row.get("name"),
            phone: row.get("phone"),
            telegram_chat_id: row.get::<Option<i64>, _>("telegram_chat_id").map(ChatId::new),
        }))
    }

    /// 電話番号の重複時は名前を更新する（upsert）。紐づけ済みのチャットは置き換えない
    async fn save(&self, guest: &Guest) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO guests (id, name, phone, telegram_chat_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (phone)
            DO UPDATE SET
                name = EXCLUDED.name,
                telegram_chat_id = COALESCE(guests.telegram_chat_id, EXCLUDED.telegram_chat_id)
            "#,
        )
        .bind(guest.id.value())
        .bind(&guest.name)
        .bind(&guest.phone)
        .bind(guest.telegram_chat_id.map(|c| c.value()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
