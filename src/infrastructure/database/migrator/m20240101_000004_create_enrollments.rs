//! Create enrollments table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000003_create_courses::Courses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Enrollments::UserId).integer().not_null())
                    .col(ColumnDef::new(Enrollments::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(Enrollments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Enrollments::UserId)
                            .col(Enrollments::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_user_id")
                            .from(Enrollments::Table, Enrollments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_course_id")
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Enrollments {
    Table,
    UserId,
    CourseId,
    CreatedAt,
}
