//! Course repository interface

use async_trait::async_trait;

use super::model::{Course, Enrollment};
use super::CreateCourseDto;
use crate::domain::DomainResult;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses ordered by id ascending
    async fn find_all(&self) -> DomainResult<Vec<Course>>;

    /// Find course by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Course>>;

    /// Save a new course and return it with its generated ID
    async fn create(&self, dto: CreateCourseDto) -> DomainResult<Course>;

    /// Link a user to a course. Returns `false` when the link already existed.
    async fn enroll(&self, user_id: i32, course_id: i32) -> DomainResult<bool>;

    /// Find the enrollment for a user/course pair
    async fn find_enrollment(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> DomainResult<Option<Enrollment>>;

    /// Number of users signed up for a course
    async fn count_enrollments(&self, course_id: i32) -> DomainResult<u64>;
}
