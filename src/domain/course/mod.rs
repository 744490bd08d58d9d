//! Course aggregate
//!
//! Courses and the enrollment link between users and courses.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateCourseDto;
pub use model::{Course, Enrollment};
pub use repository::CourseRepository;
