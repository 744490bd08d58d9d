//! User account service — application-layer orchestration
//!
//! All account-related business logic lives here.
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    AuthToken, CreateUserDto, DomainError, DomainResult, RepositoryProvider, Session, User,
};
use crate::infrastructure::crypto::password::{burn_password_check, hash_password, verify_password};
use crate::infrastructure::crypto::token::{
    generate_session_key, generate_token_key, hash_session_key,
};

/// Validated registration input
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: AuthToken,
    /// Raw session key for the cookie. Only its hash is stored.
    pub session_key: String,
    pub session_expires_at: DateTime<Utc>,
}

/// Orchestrates account and credential use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    session_ttl: Duration,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, session_ttl: Duration) -> Self {
        Self { repos, session_ttl }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a self-service account (never staff) and issue its token.
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        let user = self.create_account(input, false).await?;
        info!(user_id = user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    /// Create a staff account. Used to bootstrap the first administrator.
    pub async fn create_superuser(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<User> {
        let input = RegisterUser {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        let user = self.create_account(input, true).await?;
        info!(user_id = user.id, username = %user.username, "Superuser created");
        Ok(user)
    }

    async fn create_account(&self, input: RegisterUser, is_staff: bool) -> DomainResult<User> {
        let users = self.repos.users();

        if users.get_user_by_username(&input.username).await?.is_some() {
            return Err(username_taken());
        }

        let password_hash = hash_password(&input.password)?;

        let dto = CreateUserDto {
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash,
            is_staff,
        };

        let user = users.create_user(dto).await.map_err(|e| {
            if e.is_unique_violation() {
                username_taken()
            } else {
                e
            }
        })?;

        self.ensure_token(user.id).await?;
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials, then open a session and hand back the user's token.
    ///
    /// Every credential problem collapses into `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginOutcome> {
        let Some(user) = self.repos.users().get_user_by_username(username).await? else {
            info!(username, "Login rejected: unknown username");
            burn_password_check(password);
            return Err(DomainError::InvalidCredentials);
        };

        if !user.is_active {
            info!(user_id = user.id, "Login rejected: inactive account");
            return Err(DomainError::InvalidCredentials);
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
            warn!(user_id = user.id, "Stored password hash unreadable: {}", e);
            false
        });
        if !valid {
            info!(user_id = user.id, "Login rejected: wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.ensure_token(user.id).await?;

        let now = Utc::now();
        let purged = self.repos.credentials().delete_expired_sessions(now).await?;
        if purged > 0 {
            debug!(purged, "Expired sessions removed");
        }

        let session_key = generate_session_key();
        let session = Session {
            key_hash: hash_session_key(&session_key),
            user_id: user.id,
            created_at: now,
            expires_at: now + self.session_ttl,
        };
        let session_expires_at = session.expires_at;
        self.repos.credentials().create_session(session).await?;

        self.repos.users().touch_last_login(user.id).await?;

        info!(user_id = user.id, username = %user.username, "User logged in");
        Ok(LoginOutcome {
            user,
            token,
            session_key,
            session_expires_at,
        })
    }

    /// Drop the session behind a cookie value. Returns whether one existed.
    pub async fn logout(&self, session_key: &str) -> DomainResult<bool> {
        let removed = self
            .repos
            .credentials()
            .delete_session(&hash_session_key(session_key))
            .await?;
        if removed {
            info!("Session closed");
        }
        Ok(removed)
    }

    /// Return the user's token, creating it on first use.
    pub async fn ensure_token(&self, user_id: i32) -> DomainResult<AuthToken> {
        let credentials = self.repos.credentials();
        if let Some(token) = credentials.find_token_for_user(user_id).await? {
            return Ok(token);
        }
        credentials.create_token(user_id, &generate_token_key()).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        self.repos.users().get_user_by_username(username).await
    }

    pub async fn count_users(&self) -> DomainResult<u64> {
        self.repos.users().count_users().await
    }
}

fn username_taken() -> DomainError {
    DomainError::Validation("A user with that username already exists.".into())
}
