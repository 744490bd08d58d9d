//! Database entities module

pub mod course;
pub mod enrollment;
pub mod session;
pub mod token;
pub mod user;

pub use course::Entity as Course;
pub use enrollment::Entity as Enrollment;
pub use session::Entity as Session;
pub use token::Entity as Token;
pub use user::Entity as User;
