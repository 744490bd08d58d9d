//! Request authentication
//!
//! Each protected handler runs an [`Authenticator`] against the
//! credentials pulled off the request and matches on the [`AuthOutcome`].
//! Backends:
//!
//! - [`TokenAuthenticator`]: `Authorization: Token <key>`
//! - [`SessionAuthenticator`]: `sessionid` cookie set by login
//! - [`AuthenticatorChain`]: tries backends in order

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::token::hash_session_key;

/// Authorization scheme keyword for API tokens
pub const TOKEN_KEYWORD: &str = "Token";

/// Raw credentials carried by a request
#[derive(Debug, Clone, Default)]
pub struct RequestCredentials {
    /// Value of the `Authorization` header
    pub authorization: Option<String>,
    /// Value of the session cookie
    pub session_key: Option<String>,
}

/// Result of running an authenticator
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Authenticated(User),
    /// No credentials this backend understands
    Unauthenticated,
    /// Credentials were presented but rejected
    InvalidToken(&'static str),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &RequestCredentials) -> DomainResult<AuthOutcome>;
}

// ── Token ───────────────────────────────────────────────────────

pub struct TokenAuthenticator {
    repos: Arc<dyn RepositoryProvider>,
}

impl TokenAuthenticator {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }
}

/// Split `Token <key>`. `None` when the header uses another scheme.
fn parse_token_header(header: &str) -> Option<Result<&str, &'static str>> {
    let mut parts = header.split_whitespace();
    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case(TOKEN_KEYWORD) {
        return None;
    }
    let parsed = match (parts.next(), parts.next()) {
        (None, _) => Err("Invalid token header. No credentials provided."),
        (Some(_), Some(_)) => Err("Invalid token header. Token string should not contain spaces."),
        (Some(key), None) => Ok(key),
    };
    Some(parsed)
}

#[async_trait]
impl Authenticator for TokenAuthenticator {
    async fn authenticate(&self, credentials: &RequestCredentials) -> DomainResult<AuthOutcome> {
        let Some(header) = credentials.authorization.as_deref() else {
            return Ok(AuthOutcome::Unauthenticated);
        };
        let key = match parse_token_header(header) {
            None => return Ok(AuthOutcome::Unauthenticated),
            Some(Err(reason)) => return Ok(AuthOutcome::InvalidToken(reason)),
            Some(Ok(key)) => key,
        };

        let Some(token) = self.repos.credentials().find_token(key).await? else {
            debug!("Unknown token presented");
            return Ok(AuthOutcome::InvalidToken("Invalid token."));
        };

        match self.repos.users().get_user_by_id(token.user_id).await? {
            Some(user) if user.is_active => Ok(AuthOutcome::Authenticated(user)),
            _ => Ok(AuthOutcome::InvalidToken("User inactive or deleted.")),
        }
    }
}

// ── Session ─────────────────────────────────────────────────────

pub struct SessionAuthenticator {
    repos: Arc<dyn RepositoryProvider>,
}

impl SessionAuthenticator {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    /// A stale or unknown session is anonymous, not an error.
    async fn authenticate(&self, credentials: &RequestCredentials) -> DomainResult<AuthOutcome> {
        let Some(key) = credentials.session_key.as_deref() else {
            return Ok(AuthOutcome::Unauthenticated);
        };

        let key_hash = hash_session_key(key);
        let store = self.repos.credentials();
        let Some(session) = store.find_session(&key_hash).await? else {
            return Ok(AuthOutcome::Unauthenticated);
        };

        if session.is_expired() {
            debug!(user_id = session.user_id, "Purging expired session");
            store.delete_session(&key_hash).await?;
            return Ok(AuthOutcome::Unauthenticated);
        }

        match self.repos.users().get_user_by_id(session.user_id).await? {
            Some(user) if user.is_active => Ok(AuthOutcome::Authenticated(user)),
            _ => Ok(AuthOutcome::Unauthenticated),
        }
    }
}

// ── Chain ───────────────────────────────────────────────────────

/// Runs backends in order; the first one that authenticates or rejects wins.
#[derive(Clone, Default)]
pub struct AuthenticatorChain {
    backends: Vec<Arc<dyn Authenticator>>,
}

impl AuthenticatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, backend: Arc<dyn Authenticator>) -> Self {
        self.backends.push(backend);
        self
    }
}

#[async_trait]
impl Authenticator for AuthenticatorChain {
    async fn authenticate(&self, credentials: &RequestCredentials) -> DomainResult<AuthOutcome> {
        for backend in &self.backends {
            match backend.authenticate(credentials).await? {
                AuthOutcome::Unauthenticated => continue,
                decided => return Ok(decided),
            }
        }
        Ok(AuthOutcome::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::identity::{RegisterUser, UserService};
    use crate::infrastructure::{
        init_database_with_migrations, DatabaseConfig, SeaOrmRepositoryProvider,
    };
    use chrono::Duration;

    async fn setup() -> (Arc<dyn RepositoryProvider>, UserService) {
        let db = init_database_with_migrations(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
        let users = UserService::new(repos.clone(), Duration::days(14));
        users
            .register(RegisterUser {
                username: "TestUser".into(),
                password: "12345".into(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
            })
            .await
            .unwrap();
        (repos, users)
    }

    fn with_header(value: &str) -> RequestCredentials {
        RequestCredentials {
            authorization: Some(value.to_string()),
            session_key: None,
        }
    }

    #[test]
    fn token_header_parsing() {
        assert_eq!(parse_token_header("Token abc"), Some(Ok("abc")));
        assert_eq!(parse_token_header("token abc"), Some(Ok("abc")));
        assert_eq!(parse_token_header("Bearer abc"), None);
        assert!(matches!(parse_token_header("Token"), Some(Err(_))));
        assert!(matches!(parse_token_header("Token a b"), Some(Err(_))));
    }

    #[tokio::test]
    async fn token_backend_outcomes() {
        let (repos, users) = setup().await;
        let user = users.get_user_by_username("TestUser").await.unwrap().unwrap();
        let token = users.ensure_token(user.id).await.unwrap();
        let auth = TokenAuthenticator::new(repos);

        let outcome = auth
            .authenticate(&with_header(&format!("Token {}", token.key)))
            .await
            .unwrap();
        assert!(matches!(outcome, AuthOutcome::Authenticated(u) if u.id == user.id));

        let outcome = auth.authenticate(&with_header("Token nope")).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::InvalidToken(_)));

        let outcome = auth
            .authenticate(&RequestCredentials::default())
            .await
            .unwrap();
        assert!(matches!(outcome, AuthOutcome::Unauthenticated));
    }

    #[tokio::test]
    async fn session_backend_follows_logout() {
        let (repos, users) = setup().await;
        let login = users.login("TestUser", "12345").await.unwrap();
        let auth = SessionAuthenticator::new(repos);
        let creds = RequestCredentials {
            authorization: None,
            session_key: Some(login.session_key.clone()),
        };

        assert!(matches!(
            auth.authenticate(&creds).await.unwrap(),
            AuthOutcome::Authenticated(_)
        ));

        users.logout(&login.session_key).await.unwrap();
        assert!(matches!(
            auth.authenticate(&creds).await.unwrap(),
            AuthOutcome::Unauthenticated
        ));
    }

    #[tokio::test]
    async fn chain_falls_through_to_session() {
        let (repos, users) = setup().await;
        let login = users.login("TestUser", "12345").await.unwrap();
        let chain = AuthenticatorChain::new()
            .with(Arc::new(TokenAuthenticator::new(repos.clone())))
            .with(Arc::new(SessionAuthenticator::new(repos)));

        let creds = RequestCredentials {
            authorization: None,
            session_key: Some(login.session_key),
        };
        assert!(matches!(
            chain.authenticate(&creds).await.unwrap(),
            AuthOutcome::Authenticated(_)
        ));

        // A rejected token stops the chain even with a valid session
        let creds = RequestCredentials {
            authorization: Some("Token bogus".into()),
            ..creds
        };
        assert!(matches!(
            chain.authenticate(&creds).await.unwrap(),
            AuthOutcome::InvalidToken(_)
        ));
    }
}
