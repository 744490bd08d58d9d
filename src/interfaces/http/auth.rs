//! Credential extraction and the session cookie
//!
//! Handlers take [`RequestCredentials`] as an extractor and hand them to
//! the [`Authenticator`] their route requires via [`require_user`].

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::application::{AuthOutcome, Authenticator, RequestCredentials};
use crate::domain::{DomainError, User};
use crate::interfaces::http::error::ApiError;

/// Name of the cookie carrying the session key
pub const SESSION_COOKIE: &str = "sessionid";

const NOT_PROVIDED: &str = "Authentication credentials were not provided.";

impl<S> FromRequestParts<S> for RequestCredentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(credentials_from_headers(&parts.headers))
    }
}

pub fn credentials_from_headers(headers: &HeaderMap) -> RequestCredentials {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    RequestCredentials {
        authorization,
        session_key: session_key_from_headers(headers),
    }
}

/// Finds `sessionid` across every `Cookie` header.
fn session_key_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().trim_matches('"').to_owned())
        .filter(|value| !value.is_empty())
}

/// Runs `authenticator` and turns anything but a user into a 401.
pub async fn require_user(
    authenticator: &dyn Authenticator,
    credentials: &RequestCredentials,
) -> Result<User, ApiError> {
    match authenticator.authenticate(credentials).await? {
        AuthOutcome::Authenticated(user) => Ok(user),
        AuthOutcome::Unauthenticated => Err(DomainError::Unauthorized(NOT_PROVIDED.into()).into()),
        AuthOutcome::InvalidToken(reason) => Err(DomainError::Unauthorized(reason.into()).into()),
    }
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(key: &str, max_age_secs: i64, secure: bool) -> String {
    format!(
        "{SESSION_COOKIE}={key}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_secs}{}",
        if secure { "; Secure" } else { "" }
    )
}

/// `Set-Cookie` value telling the client to drop its session.
pub fn expired_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
