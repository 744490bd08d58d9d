//! HTTP REST API interfaces
//!
//! - `auth`: credential extraction and the session cookie
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod auth;
pub mod common;
pub mod error;
pub mod modules;
pub mod router;

pub use error::ApiError;
pub use router::{create_api_router, ApiState};
