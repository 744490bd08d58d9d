//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_tokens;
mod m20240101_000003_create_courses;
mod m20240101_000004_create_enrollments;
mod m20240101_000005_create_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_tokens::Migration),
            Box::new(m20240101_000003_create_courses::Migration),
            Box::new(m20240101_000004_create_enrollments::Migration),
            Box::new(m20240101_000005_create_sessions::Migration),
        ]
    }
}
