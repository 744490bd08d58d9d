//! # Course Enrollment Service
//!
//! REST backend for a course catalogue: users register and log in, then
//! list courses and sign up for them.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities, repository traits and errors
//! - **application**: Use cases (`CourseService`, `UserService`) and request authentication
//! - **infrastructure**: Database (SeaORM entities, migrations, repositories) and crypto
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, init_database_with_migrations, DatabaseConfig, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};
