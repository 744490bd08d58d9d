use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{AuthToken, Session};
use crate::domain::DomainResult;

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_token(&self, key: &str) -> DomainResult<Option<AuthToken>>;
    async fn find_token_for_user(&self, user_id: i32) -> DomainResult<Option<AuthToken>>;
    async fn create_token(&self, user_id: i32, key: &str) -> DomainResult<AuthToken>;

    async fn create_session(&self, session: Session) -> DomainResult<()>;
    async fn find_session(&self, key_hash: &str) -> DomainResult<Option<Session>>;
    /// Returns whether a session was removed
    async fn delete_session(&self, key_hash: &str) -> DomainResult<bool>;
    /// Drop every session that expired at or before `now`; returns the count
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> DomainResult<u64>;
}
