//! Users module: registration, login and logout

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
