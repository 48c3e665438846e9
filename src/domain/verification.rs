use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ChatId;

/// 認証コードの桁数
pub const CODE_LENGTH: usize = 6;

/// 認証コード
///
/// Telegramのチャットとゲストの電話番号を紐づけるために発行される。
/// 有効期限はストレージではなく認証ユースケースが判定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    pub code: String,
    pub chat_id: ChatId,
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    /// ランダムな数字コードを発行する
    pub fn issue(chat_id: ChatId, now: DateTime<Utc>) -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();

        Self {
            code,
            chat_id,
            created_at: now,
        }
    }

    /// `now` 時点で有効か
    ///
    /// 作成から ttl が経過した瞬間に無効となる（境界は無効側）。
    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at < ttl
    }
}
