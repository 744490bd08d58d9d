//! Course service
//!
//! Catalogue queries, staff-only course creation and user signup.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Course, CreateCourseDto, DomainError, DomainResult, RepositoryProvider, User};

pub struct CourseService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CourseService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// All courses in id order
    pub async fn list_courses(&self) -> DomainResult<Vec<Course>> {
        self.repos.courses().find_all().await
    }

    pub async fn get_course(&self, id: i32) -> DomainResult<Course> {
        self.repos
            .courses()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Course", "id", id))
    }

    /// Only staff may manage the catalogue.
    pub fn ensure_can_manage(&self, actor: &User) -> DomainResult<()> {
        if actor.is_staff {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "You do not have permission to perform this action.".into(),
            ))
        }
    }

    /// Administrative course creation; staff only.
    pub async fn create_course(&self, actor: &User, dto: CreateCourseDto) -> DomainResult<Course> {
        self.ensure_can_manage(actor)?;
        let course = self.repos.courses().create(dto).await?;
        info!(course_id = course.id, title = %course.title, created_by = actor.id, "Course created");
        Ok(course)
    }

    /// Sign `user` up for a course and return the course.
    ///
    /// Signing up again for the same course is a no-op.
    pub async fn signup(&self, user: &User, course_id: i32) -> DomainResult<Course> {
        let course = self.get_course(course_id).await?;
        let created = self.repos.courses().enroll(user.id, course.id).await?;
        if created {
            info!(user_id = user.id, course_id = course.id, "User signed up for course");
        } else {
            info!(user_id = user.id, course_id = course.id, "User already signed up");
        }
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::identity::{RegisterUser, UserService};
    use crate::infrastructure::{
        init_database_with_migrations, DatabaseConfig, SeaOrmRepositoryProvider,
    };
    use chrono::{Duration, Utc};

    struct Fixture {
        courses: CourseService,
        users: UserService,
        repos: Arc<dyn RepositoryProvider>,
    }

    async fn fixture() -> Fixture {
        let db = init_database_with_migrations(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
        Fixture {
            courses: CourseService::new(repos.clone()),
            users: UserService::new(repos.clone(), Duration::days(14)),
            repos,
        }
    }

    fn course(title: &str) -> CreateCourseDto {
        CreateCourseDto {
            title: title.into(),
            price: 100,
            date_start: Utc::now(),
            duration: 5,
        }
    }

    async fn member(users: &UserService) -> User {
        users
            .register(RegisterUser {
                username: "TestUser".into(),
                password: "12345".into(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn staff_creates_and_lists_in_id_order() {
        let f = fixture().await;
        let admin = f
            .users
            .create_superuser("TestUser1111", "admin@admin.ru", "admin123")
            .await
            .unwrap();

        let first = f.courses.create_course(&admin, course("TestCourse1")).await.unwrap();
        let second = f.courses.create_course(&admin, course("TestCourse2")).await.unwrap();

        let all = f.courses.list_courses().await.unwrap();
        assert_eq!(all, vec![first.clone(), second]);
        assert_eq!(f.courses.get_course(first.id).await.unwrap(), first);
    }

    #[tokio::test]
    async fn non_staff_cannot_create() {
        let f = fixture().await;
        let user = member(&f.users).await;
        let err = f
            .courses
            .create_course(&user, course("Nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(f.courses.list_courses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn signup_is_idempotent() {
        let f = fixture().await;
        let course = f.repos.courses().create(course("TestCourse")).await.unwrap();
        let user = member(&f.users).await;

        let signed = f.courses.signup(&user, course.id).await.unwrap();
        assert_eq!(signed.title, "TestCourse");
        f.courses.signup(&user, course.id).await.unwrap();

        assert_eq!(f.repos.courses().count_enrollments(course.id).await.unwrap(), 1);
        assert!(f
            .repos
            .courses()
            .find_enrollment(user.id, course.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn signup_unknown_course_is_not_found() {
        let f = fixture().await;
        let user = member(&f.users).await;
        let err = f.courses.signup(&user, 15).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(f
            .repos
            .courses()
            .find_enrollment(user.id, 15)
            .await
            .unwrap()
            .is_none());
    }
}
