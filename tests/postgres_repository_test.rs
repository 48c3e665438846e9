//! PostgreSQLアダプターのテスト
//!
//! 実データベースが必要なため `cargo test -- --ignored` で実行する。

mod common;

use chrono::{DateTime, Duration, Utc};
use quiet_groove::adapters::postgres::{
    PostgresExtraRepository, PostgresGuestRepository, PostgresHouseRepository,
    PostgresReservationRepository, PostgresVerificationRepository,
};
use quiet_groove::domain::{
    ChatId, ExtraBooking, ExtraId, Guest, GuestId, HouseId, Reservation, ReservationId,
    ReservationStatus, VerificationCode,
};
use quiet_groove::ports::{
    ExtraRepository, GuestRepository, HouseRepository, ReservationRepository,
    VerificationRepository,
};
use serial_test::serial;
use sqlx::PgPool;

use common::{date, forest_house, sauna};

/// PostgreSQLの時刻精度（マイクロ秒）に合わせて丸める
fn truncate_to_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(dt.timestamp_micros()).expect("Invalid timestamp")
}

/// テーブルを空にしてカタログを投入する
async fn reset_database(pool: &PgPool) {
    sqlx::query(
        "TRUNCATE TABLE reservation_extras, reservations, guests, verification_codes, \
         extra_fill_options, extras, houses CASCADE",
    )
    .execute(pool)
    .await
    .expect("Failed to truncate tables");

    let house = forest_house();
    sqlx::query(
        "INSERT INTO houses (id, name, description, base_price, capacity, image_url) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(house.id.value())
    .bind(&house.name)
    .bind(&house.description)
    .bind(house.base_price)
    .bind(house.capacity as i32)
    .bind(&house.image_url)
    .execute(pool)
    .await
    .expect("Failed to insert house");

    let extra = sauna();
    sqlx::query("INSERT INTO extras (id, name, price) VALUES ($1, $2, $3)")
        .bind(extra.id.value())
        .bind(&extra.name)
        .bind(extra.price)
        .execute(pool)
        .await
        .expect("Failed to insert extra");

    for option in &extra.fill_options {
        sqlx::query(
            "INSERT INTO extra_fill_options (id, extra_id, name, price) VALUES ($1, $2, $3, $4)",
        )
        .bind(option.id)
        .bind(extra.id.value())
        .bind(&option.name)
        .bind(option.price)
        .execute(pool)
        .await
        .expect("Failed to insert fill option");
    }
}

fn guest(chat_id: Option<ChatId>) -> Guest {
    Guest {
        id: GuestId::new(),
        name: "Анна".to_string(),
        phone: "+79001234567".to_string(),
        telegram_chat_id: chat_id,
    }
}

fn reservation(guest: &Guest) -> Reservation {
    Reservation {
        id: ReservationId::new(),
        house_id: HouseId::new(1),
        guest_id: guest.id,
        check_in: date(2025, 7, 4),
        check_out: date(2025, 7, 6),
        guests_count: 2,
        total_price: 19_500,
        status: ReservationStatus::Confirmed,
        extras: vec![ExtraBooking {
            extra_id: ExtraId::new(10),
            name: "Баня".to_string(),
            date: date(2025, 7, 5),
            time_from: "18:00".to_string(),
            time_to: "20:00".to_string(),
            fill_option: Some("Веник".to_string()),
            price: 3_500,
        }],
        created_at: truncate_to_micros(Utc::now()),
    }
}

// ============================================================================
// カタログ
// ============================================================================

#[tokio::test]
#[ignore]
#[serial]
async fn test_catalog_repositories() {
    let pool = common::create_test_pool().await;
    reset_database(&pool).await;

    let houses = PostgresHouseRepository::new(pool.clone());
    let extras = PostgresExtraRepository::new(pool.clone());

    assert_eq!(houses.list().await.unwrap(), vec![forest_house()]);
    assert_eq!(houses.get(HouseId::new(1)).await.unwrap(), Some(forest_house()));
    assert_eq!(houses.get(HouseId::new(404)).await.unwrap(), None);

    assert_eq!(extras.list().await.unwrap(), vec![sauna()]);
    assert_eq!(extras.get(ExtraId::new(10)).await.unwrap(), Some(sauna()));
}

// ============================================================================
// 予約とゲスト
// ============================================================================

#[tokio::test]
#[ignore]
#[serial]
async fn test_reservation_is_visible_only_to_owner_chat() {
    // Arrange
    let pool = common::create_test_pool().await;
    reset_database(&pool).await;

    let guests = PostgresGuestRepository::new(pool.clone());
    let reservations = PostgresReservationRepository::new(pool.clone());

    let owner_chat = ChatId::new(5001);
    let guest = guest(Some(owner_chat));
    guests.save(&guest).await.unwrap();
    let reservation = reservation(&guest);

    // Act
    reservations.insert(&reservation).await.unwrap();

    // Assert: 所有者からは一覧・詳細ともに見える
    let summaries = reservations.find_summaries_by_chat(owner_chat).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, reservation.id);
    assert_eq!(summaries[0].house_name, "Лесной");

    let detail = reservations
        .find_detail_for_chat(owner_chat, reservation.id)
        .await
        .unwrap()
        .expect("owner should see the reservation");
    assert_eq!(detail.total_price, 19_500);
    assert_eq!(detail.status, ReservationStatus::Confirmed);
    assert_eq!(detail.extras, reservation.extras);
    assert_eq!(detail.image_url, "https://example.com/forest.jpg");

    // 他のチャットからは見えない
    let stranger = ChatId::new(9999);
    assert!(reservations.find_summaries_by_chat(stranger).await.unwrap().is_empty());
    assert!(
        reservations
            .find_detail_for_chat(stranger, reservation.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_guest_upsert_by_phone_keeps_chat() {
    let pool = common::create_test_pool().await;
    reset_database(&pool).await;
    let guests = PostgresGuestRepository::new(pool.clone());

    let first = guest(Some(ChatId::new(5001)));
    guests.save(&first).await.unwrap();

    // 同じ電話番号、チャットなし
    let second = Guest {
        name: "Анна Петрова".to_string(),
        telegram_chat_id: None,
        ..first.clone()
    };
    guests.save(&second).await.unwrap();

    let stored = guests.find_by_phone(&first.phone).await.unwrap().unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.name, "Анна Петрова");
    assert_eq!(stored.telegram_chat_id, Some(ChatId::new(5001)));
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_guest_chat_link_is_not_replaced() {
    let pool = common::create_test_pool().await;
    reset_database(&pool).await;
    let guests = PostgresGuestRepository::new(pool.clone());

    let first = guest(Some(ChatId::new(5001)));
    guests.save(&first).await.unwrap();
    guests
        .save(&Guest {
            telegram_chat_id: Some(ChatId::new(666)),
            ..first.clone()
        })
        .await
        .unwrap();

    let stored = guests.find_by_phone(&first.phone).await.unwrap().unwrap();
    assert_eq!(stored.telegram_chat_id, Some(ChatId::new(5001)));
}

// ============================================================================
// 認証コード
// ============================================================================

#[tokio::test]
#[ignore]
#[serial]
async fn test_verification_code_is_taken_once() {
    let pool = common::create_test_pool().await;
    reset_database(&pool).await;
    let codes = PostgresVerificationRepository::new(pool.clone());

    let now = truncate_to_micros(Utc::now());
    let code = VerificationCode {
        code: "123456".to_string(),
        chat_id: ChatId::new(5001),
        created_at: now - Duration::minutes(5),
    };
    assert!(codes.try_insert(&code, now - Duration::hours(1)).await.unwrap());

    // 同時に取り出しても1件だけ
    let (first, second) = tokio::join!(codes.take("123456"), codes.take("123456"));
    let taken: Vec<VerificationCode> = [first.unwrap(), second.unwrap()]
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(taken, vec![code]);

    assert_eq!(codes.take("123456").await.unwrap(), None);
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_live_verification_code_is_not_overwritten() {
    let pool = common::create_test_pool().await;
    reset_database(&pool).await;
    let codes = PostgresVerificationRepository::new(pool.clone());

    let now = truncate_to_micros(Utc::now());
    let expired_before = now - Duration::hours(1);
    let owner = VerificationCode {
        code: "654321".to_string(),
        chat_id: ChatId::new(9999),
        created_at: now - Duration::minutes(5),
    };
    assert!(codes.try_insert(&owner, expired_before).await.unwrap());

    let colliding = VerificationCode {
        chat_id: ChatId::new(5001),
        created_at: now,
        ..owner.clone()
    };
    assert!(!codes.try_insert(&colliding, expired_before).await.unwrap());
    assert_eq!(codes.take("654321").await.unwrap(), Some(owner));
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_expired_verification_code_is_replaced() {
    let pool = common::create_test_pool().await;
    reset_database(&pool).await;
    let codes = PostgresVerificationRepository::new(pool.clone());

    let now = truncate_to_micros(Utc::now());
    let stale = VerificationCode {
        code: "111111".to_string(),
        chat_id: ChatId::new(9999),
        created_at: now - Duration::hours(2),
    };
    assert!(codes.try_insert(&stale, now - Duration::hours(3)).await.unwrap());

    let fresh = VerificationCode {
        chat_id: ChatId::new(5001),
        created_at: now,
        ..stale
    };
    assert!(codes.try_insert(&fresh, now - Duration::hours(1)).await.unwrap());
    assert_eq!(codes.take("111111").await.unwrap(), Some(fresh));
}
