//! User account API handlers
//!
//! Thin wrappers over `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisteredUserDto};
use crate::application::identity::{UserService, TOKEN_KEYWORD};
use crate::application::RequestCredentials;
use crate::interfaces::http::auth::{expired_session_cookie, session_cookie};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::error::ApiError;

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
    /// Adds `Secure` to the session cookie
    pub secure_cookie: bool,
}

#[utoipa::path(
    post,
    path = "/users/",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisteredUserDto),
        (status = 400, description = "Missing or invalid fields, or username taken", body = ApiResponse<String>),
        (status = 405, description = "Any method other than POST", body = ApiResponse<String>)
    )
)]
pub async fn register(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUserDto>), ApiError> {
    let user = state.user_service.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/users/login/",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; sets the session cookie", body = LoginResponse),
        (status = 400, description = "Unable to log in with provided credentials", body = ApiResponse<String>)
    )
)]
pub async fn login(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let outcome = state.user_service.login(&username, &password).await?;

    let cookie = session_cookie(
        &outcome.session_key,
        state.user_service.session_ttl().num_seconds(),
        state.secure_cookie,
    );
    let body = LoginResponse {
        token: outcome.token.key,
        token_type: TOKEN_KEYWORD.to_string(),
        user: outcome.user.into(),
    };

    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

#[utoipa::path(
    post,
    path = "/users/logout/",
    tag = "Users",
    responses(
        (status = 204, description = "Session ended and cookie cleared")
    ),
    security((), ("session_cookie" = []))
)]
pub async fn logout(
    State(state): State<UserHandlerState>,
    credentials: RequestCredentials,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(key) = credentials.session_key.as_deref() {
        state.user_service.logout(key).await?;
    }

    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, expired_session_cookie(state.secure_cookie))],
    ))
}
