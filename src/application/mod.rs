pub mod courses;
pub mod identity;

pub use courses::CourseService;
pub use identity::{
    AuthOutcome, Authenticator, AuthenticatorChain, RequestCredentials, SessionAuthenticator,
    TokenAuthenticator, UserService,
};
