use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert a user. Fails with a unique violation when the username is taken.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn count_users(&self) -> DomainResult<u64>;

    /// Stamp `last_login` with the current time.
    async fn touch_last_login(&self, id: i32) -> DomainResult<()>;
}
