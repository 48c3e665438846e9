use crate::domain::{
    ChatId, ExtraBooking, ExtraId, Reservation, ReservationDetail, ReservationId,
    ReservationStatus, ReservationSummary,
};
use crate::ports::reservation_repository::{ReservationRepository as ReservationRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

/// INT列を u32 に変換する
pub(super) fn to_u32(value: i32, column: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{} out of range: {}", column, value),
        )) as Box<dyn std::error::Error + Send + Sync>
    })
}

fn map_row_to_extra_booking(row: &PgRow) -> ExtraBooking {
    ExtraBooking {
        extra_id: ExtraId::new(row.get("extra_id")),
        name: row.get("name"),
        date: row.get("date"),
        time_from: row.get("time_from"),
        time_to: row.get("time_to"),
        fill_option: row.get("fill_option"),
        price: row.get("price"),
    }
}

/// ReservationRepositoryのPostgreSQL実装
///
/// 内部の連番ID（reservations.id）は結合にのみ使い、外部には uuid を返す。
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_extras(&self, internal_id: i64) -> Result<Vec<ExtraBooking>> {
        let rows = sqlx::query(
            r#"
            SELECT extra_id, name, date, time_from, time_to, fill_option, price
            FROM reservation_extras
            WHERE reservation_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(internal_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_extra_booking).collect())
    }
}

#[async_trait]
impl ReservationRepositoryTrait for ReservationRepository {
    /// 予約と追加サービスを1トランザクションで保存する
    async fn insert(&self, reservation: &Reservation) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO reservations (
                uuid,
                house_id,
                guest_id,
                check_in,
                check_out,
                guests_count,
                total_price,
                status,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(reservation.id.value())
        .bind(reservation.house_id.value())
        .bind(reservation.guest_id.value())
        .bind(reservation.check_in)
        .bind(reservation.check_out)
        .bind(reservation.guests_count as i32)
        .bind(reservation.total_price)
        .bind(reservation.status.as_str())
        .bind(reservation.created_at)
        .fetch_one(&mut *tx)
        .await?;

        let internal_id: i64 = row.get("id");

        for extra in &reservation.extras {
            sqlx::query(
                r#"
                INSERT INTO reservation_extras (
                    reservation_id, extra_id, name, date, time_from, time_to, fill_option, price
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(internal_id)
            .bind(extra.extra_id.value())
            .bind(&extra.name)
            .bind(extra.date)
            .bind(&extra.time_from)
            .bind(&extra.time_to)
            .bind(extra.fill_option.as_deref())
            .bind(extra.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_summaries_by_chat(&self, chat_id: ChatId) -> Result<Vec<ReservationSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT r.uuid, h.name AS house_name, r.check_in, r.check_out
            FROM reservations r
            JOIN guests g ON g.id = r.guest_id
            JOIN houses h ON h.id = r.house_id
            WHERE g.telegram_chat_id = $1
            ORDER BY r.check_in ASC
            "#,
        )
        .bind(chat_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ReservationSummary {
                id: ReservationId::from_uuid(row.get("uuid")),
                house_name: row.get("house_name"),
                check_in: row.get("check_in"),
                check_out: row.get("check_out"),
            })
            .collect())
    }

    /// 所有者（チャット）の条件をSQLに含めて取得する
    async fn find_detail_for_chat(
        &self,
        chat_id: ChatId,
        reservation_id: ReservationId,
    ) -> Result<Option<ReservationDetail>> {
        let row = sqlx::query(
            r#"
            SELECT
                r.id,
                r.uuid,
                h.name AS house_name,
                h.image_url,
                r.check_in,
                r.check_out,
                r.guests_count,
                r.total_price,
                r.status
            FROM reservations r
            JOIN guests g ON g.id = r.guest_id
            JOIN houses h ON h.id = r.house_id
            WHERE r.uuid = $1 AND g.telegram_chat_id = $2
            "#,
        )
        .bind(reservation_id.value())
        .bind(chat_id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let extras = self.load_extras(row.get("id")).await?;
        let status: String = row.get("status");

        Ok(Some(ReservationDetail {
            id: ReservationId::from_uuid(row.get("uuid")),
            house_name: row.get("house_name"),
            check_in: row.get("check_in"),
            check_out: row.get("check_out"),
            guests_count: to_u32(row.get("guests_count"), "guests_count")?,
            total_price: row.get("total_price"),
            status: ReservationStatus::from(status),
            extras,
            image_url: row.get("image_url"),
        }))
    }
}
