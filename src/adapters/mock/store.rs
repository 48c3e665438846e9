use crate::domain::{
    ChatId, Extra, ExtraId, Guest, GuestId, House, HouseId, Reservation, ReservationDetail,
    ReservationId, ReservationSummary, VerificationCode,
};
use crate::ports::{
    ExtraRepository, GuestRepository, HouseRepository, ReservationRepository,
    VerificationRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Default)]
struct State {
    reservations: Vec<Reservation>,
    guests: HashMap<GuestId, Guest>,
    houses: BTreeMap<HouseId, House>,
    extras: BTreeMap<ExtraId, Extra>,
    codes: HashMap<String, VerificationCode>,
}

/// インメモリのストレージ
///
/// すべてのリポジトリポートを1つの状態で実装し、
/// 予約一覧に必要な結合（宿泊棟名、ゲストのチャット）を行える。
/// テストとデータベース未設定時のローカル起動で使う。
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用に宿泊棟を登録
    pub fn add_house(&self, house: House) {
        self.state.lock().unwrap().houses.insert(house.id, house);
    }

    /// テスト用に追加サービスを登録
    pub fn add_extra(&self, extra: Extra) {
        self.state.lock().unwrap().extras.insert(extra.id, extra);
    }

    /// テスト用にゲストを登録
    pub fn add_guest(&self, guest: Guest) {
        self.state.lock().unwrap().guests.insert(guest.id, guest);
    }

    /// 保存済みの予約（挿入順）
    pub fn reservations(&self) -> Vec<Reservation> {
        self.state.lock().unwrap().reservations.clone()
    }

    /// true にするとすべての操作が失敗する（障害のシミュレーション）
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err("in-memory store is unavailable".into());
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn insert(&self, reservation: &Reservation) -> Result<()> {
        self.check_available()?;
        self.state
            .lock()
            .unwrap()
            .reservations
            .push(reservation.clone());
        Ok(())
    }

    async fn find_summaries_by_chat(&self, chat_id: ChatId) -> Result<Vec<ReservationSummary>> {
        self.check_available()?;
        let state = self.state.lock().unwrap();

        let mut summaries: Vec<ReservationSummary> = state
            .reservations
            .iter()
            .filter(|r| owned_by(&state, r, chat_id))
            .map(|r| ReservationSummary {
                id: r.id,
                house_name: state
                    .houses
                    .get(&r.house_id)
                    .map(|h| h.name.clone())
                    .unwrap_or_default(),
                check_in: r.check_in,
                check_out: r.check_out,
            })
            .collect();
        summaries.sort_by_key(|s| s.check_in);

        Ok(summaries)
    }

    async fn find_detail_for_chat(
        &self,
        chat_id: ChatId,
        reservation_id: ReservationId,
    ) -> Result<Option<ReservationDetail>> {
        self.check_available()?;
        let state = self.state.lock().unwrap();

        let detail = state
            .reservations
            .iter()
            .find(|r| r.id == reservation_id && owned_by(&state, r, chat_id))
            .map(|r| {
                let house = state.houses.get(&r.house_id);
                ReservationDetail {
                    id: r.id,
                    house_name: house.map(|h| h.name.clone()).unwrap_or_default(),
                    check_in: r.check_in,
                    check_out: r.check_out,
                    guests_count: r.guests_count,
                    total_price: r.total_price,
                    status: r.status.clone(),
                    extras: r.extras.clone(),
                    image_url: house.map(|h| h.image_url.clone()).unwrap_or_default(),
                }
            });

        Ok(detail)
    }
}

fn owned_by(state: &State, reservation: &Reservation, chat_id: ChatId) -> bool {
    state
        .guests
        .get(&reservation.guest_id)
        .is_some_and(|g| g.telegram_chat_id == Some(chat_id))
}

#[async_trait]
impl GuestRepository for InMemoryStore {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Guest>> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        Ok(state.guests.values().find(|g| g.phone == phone).cloned())
    }

    async fn save(&self, guest: &Guest) -> Result<()> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        // 紐づけ済みのチャットは置き換えない（PostgreSQL実装と同じ）
        let linked = state
            .guests
            .values()
            .find(|g| g.phone == guest.phone)
            .and_then(|g| g.telegram_chat_id);
        state.guests.retain(|_, g| g.phone != guest.phone || g.id == guest.id);
        state.guests.insert(
            guest.id,
            Guest {
                telegram_chat_id: linked.or(guest.telegram_chat_id),
                ..guest.clone()
            },
        );
        Ok(())
    }
}

#[async_trait]
impl HouseRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<House>> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().houses.values().cloned().collect())
    }

    async fn get(&self, house_id: HouseId) -> Result<Option<House>> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().houses.get(&house_id).cloned())
    }
}

#[async_trait]
impl ExtraRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Extra>> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().extras.values().cloned().collect())
    }

    async fn get(&self, extra_id: ExtraId) -> Result<Option<Extra>> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().extras.get(&extra_id).cloned())
    }
}

#[async_trait]
impl VerificationRepository for InMemoryStore {
    async fn try_insert(
        &self,
        code: &VerificationCode,
        expired_before: DateTime<Utc>,
    ) -> Result<bool> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        let live = state
            .codes
            .get(&code.code)
            .is_some_and(|existing| existing.created_at > expired_before);
        if live {
            return Ok(false);
        }
        state.codes.insert(code.code.clone(), code.clone());
        Ok(true)
    }

    async fn take(&self, code: &str) -> Result<Option<VerificationCode>> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().codes.remove(code))
    }
}
