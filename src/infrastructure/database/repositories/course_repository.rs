//! SeaORM implementation of CourseRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::{Course, CourseRepository, CreateCourseDto, DomainError, DomainResult, Enrollment};
use crate::infrastructure::database::entities::{course, enrollment};

pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: course::Model) -> Course {
    Course {
        id: m.id,
        title: m.title,
        price: m.price,
        date_start: m.date_start,
        duration: m.duration,
    }
}

fn enrollment_to_domain(m: enrollment::Model) -> Enrollment {
    Enrollment {
        user_id: m.user_id,
        course_id: m.course_id,
        created_at: m.created_at,
    }
}

// ── CourseRepository impl ───────────────────────────────────────

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn find_all(&self) -> DomainResult<Vec<Course>> {
        let models = course::Entity::find()
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Course>> {
        let model = course::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn create(&self, dto: CreateCourseDto) -> DomainResult<Course> {
        debug!(title = %dto.title, "Inserting course");

        let model = course::ActiveModel {
            title: Set(dto.title),
            price: Set(dto.price),
            date_start: Set(dto.date_start),
            duration: Set(dto.duration),
            ..Default::default()
        };
        let model = model.insert(&self.db).await?;
        Ok(model_to_domain(model))
    }

    async fn enroll(&self, user_id: i32, course_id: i32) -> DomainResult<bool> {
        if self.find_enrollment(user_id, course_id).await?.is_some() {
            return Ok(false);
        }

        let model = enrollment::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            created_at: Set(Utc::now()),
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) => {
                // Lost a race with a concurrent signup for the same pair
                let err = DomainError::from(e);
                if err.is_unique_violation() {
                    Ok(false)
                } else {
                    Err(err)
                }
            }
        }
    }

    async fn find_enrollment(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> DomainResult<Option<Enrollment>> {
        let model = enrollment::Entity::find_by_id((user_id, course_id))
            .one(&self.db)
            .await?;
        Ok(model.map(enrollment_to_domain))
    }

    async fn count_enrollments(&self, course_id: i32) -> DomainResult<u64> {
        Ok(enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await?)
    }
}
