//! Credentials aggregate
//!
//! Authentication tokens and login sessions bound to users.

pub mod model;
pub mod repository;

pub use model::{AuthToken, Session};
pub use repository::CredentialRepository;
