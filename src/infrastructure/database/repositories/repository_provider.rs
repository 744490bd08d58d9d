//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::course::CourseRepository;
use crate::domain::credentials::CredentialRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepositoryInterface;

use super::course_repository::SeaOrmCourseRepository;
use super::credential_repository::SeaOrmCredentialRepository;
use super::user_repository::UserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    users: UserRepository,
    courses: SeaOrmCourseRepository,
    credentials: SeaOrmCredentialRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            courses: SeaOrmCourseRepository::new(db.clone()),
            credentials: SeaOrmCredentialRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn courses(&self) -> &dyn CourseRepository {
        &self.courses
    }

    fn credentials(&self) -> &dyn CredentialRepository {
        &self.credentials
    }
}
