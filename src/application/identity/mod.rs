//! Identity module — user accounts & authentication
//!
//! - `UserService`: registration, login, logout, superuser bootstrap
//! - `Authenticator`: pluggable request authentication (token, session)

pub mod authenticator;
pub mod service;

pub use authenticator::{
    AuthOutcome, Authenticator, AuthenticatorChain, RequestCredentials, SessionAuthenticator,
    TokenAuthenticator, TOKEN_KEYWORD,
};
pub use service::{LoginOutcome, RegisterUser, UserService};
