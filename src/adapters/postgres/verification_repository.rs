use crate::domain::{ChatId, VerificationCode};
use crate::ports::verification_repository::{
    Result, VerificationRepository as VerificationRepositoryTrait,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

/// VerificationRepositoryのPostgreSQL実装
///
/// 期限切れの判定はしない（ユースケースの責務）。
pub struct VerificationRepository {
    pool: PgPool,
}

impl VerificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationRepositoryTrait for VerificationRepository {
    /// 有効なコードとの衝突時は行が変わらず、影響行数が0になる
    async fn try_insert(
        &self,
        code: &VerificationCode,
        expired_before: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO verification_codes (code, chat_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (code)
            DO UPDATE SET
                chat_id = EXCLUDED.chat_id,
                created_at = EXCLUDED.created_at
            WHERE verification_codes.created_at <= $4
            "#,
        )
        .bind(&code.code)
        .bind(code.chat_id.value())
        .bind(code.created_at)
        .bind(expired_before)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn take(&self, code: &str) -> Result<Option<VerificationCode>> {
        let row = sqlx::query(
            r#"
            DELETE FROM verification_codes
            WHERE code = $1
            RETURNING code, chat_id, created_at
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| VerificationCode {
            code: row.get("code"),
            chat_id: ChatId::new(row.get("chat_id")),
            created_at: row.get("created_at"),
        }))
    }
}
