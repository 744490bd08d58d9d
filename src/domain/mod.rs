//! Domain layer: entities, DTOs and repository interfaces.

pub mod course;
pub mod credentials;
pub mod repositories;
pub mod user;

pub use course::{Course, CourseRepository, CreateCourseDto, Enrollment};
pub use credentials::{AuthToken, CredentialRepository, Session};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{CreateUserDto, User, UserRepositoryInterface};

pub use crate::shared::errors::DomainError;
