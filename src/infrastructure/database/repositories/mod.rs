//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod course_repository;
pub mod credential_repository;
pub mod repository_provider;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
