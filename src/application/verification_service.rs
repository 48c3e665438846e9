use crate::domain::{ChatId, VerificationCode};
use crate::ports::verification_issuer;
use crate::ports::{VerificationIssuer, VerificationRepository};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use super::errors::{UsecaseError, VerificationError};

/// 認証コードの有効期間
pub fn verification_ttl() -> Duration {
    Duration::hours(1)
}

/// 有効なコードと衝突したときに作り直す回数の上限
pub const MAX_ISSUE_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct VerificationDependencies {
    pub repo: Option<Arc<dyn VerificationRepository>>,
    pub ttl: Duration,
}

/// 認証ユースケース
///
/// 有効期限の判定はストレージではなくここで行う。
pub struct VerificationService {
    repo: Arc<dyn VerificationRepository>,
    ttl: Duration,
}

impl VerificationService {
    pub fn new(deps: VerificationDependencies) -> Result<Self, UsecaseError> {
        if deps.ttl <= Duration::zero() {
            return Err(UsecaseError::InvalidConfiguration(format!(
                "verification TTL must be positive, got {}",
                deps.ttl
            )));
        }

        Ok(Self {
            repo: deps
                .repo
                .ok_or(UsecaseError::MissingDependency("verification repository"))?,
            ttl: deps.ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// チャットに対して新しい認証コードを発行する
    ///
    /// 他のチャットの有効なコードは上書きしない。衝突したら作り直す。
    pub async fn issue(
        &self,
        chat_id: ChatId,
        now: DateTime<Utc>,
    ) -> Result<VerificationCode, VerificationError> {
        let expired_before = now - self.ttl;

        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let code = VerificationCode::issue(chat_id, now);
            let inserted = self
                .repo
                .try_insert(&code, expired_before)
                .await
                .map_err(VerificationError::Repository)?;

            if inserted {
                tracing::info!(%chat_id, attempt, "Verification code issued");
                return Ok(code);
            }
            tracing::debug!(%chat_id, attempt, "Verification code collided with a live one");
        }

        tracing::error!(%chat_id, "Could not allocate a verification code");
        Err(VerificationError::Exhausted(MAX_ISSUE_ATTEMPTS))
    }

    /// 認証コードを検証し、紐づくチャットを返す
    ///
    /// コードは一度きり。取り出した時点で消えるので、期限切れでも再利用はできない。
    pub async fn verify(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<ChatId, VerificationError> {
        let record = self
            .repo
            .take(code)
            .await
            .map_err(VerificationError::Repository)?
            .ok_or(VerificationError::NotFound)?;

        if !record.is_valid_at(now, self.ttl) {
            tracing::info!(chat_id = %record.chat_id, "Verification code expired");
            return Err(VerificationError::Expired);
        }

        Ok(record.chat_id)
    }
}

#[async_trait]
impl VerificationIssuer for VerificationService {
    async fn issue_for_chat(&self, chat_id: ChatId) -> verification_issuer::Result<VerificationCode> {
        Ok(self.issue(chat_id, Utc::now()).await?)
    }
}
