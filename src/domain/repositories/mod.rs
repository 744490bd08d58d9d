//! Repository access for the domain layer
//!
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::course::CourseRepository;
use super::credentials::CredentialRepository;
use super::user::UserRepositoryInterface;

pub use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let course = repos.courses().find_by_id(1).await?;
///     let user = repos.users().get_user_by_username("alice").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepositoryInterface;
    fn courses(&self) -> &dyn CourseRepository;
    fn credentials(&self) -> &dyn CredentialRepository;
}
