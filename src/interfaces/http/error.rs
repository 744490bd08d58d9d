//! Mapping of failures onto HTTP responses

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::application::identity::TOKEN_KEYWORD;
use crate::domain::DomainError;
use crate::interfaces::http::common::ApiResponse;

/// Error returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ApiError::Domain(DomainError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Not found.".to_string())
            }
            ApiError::Domain(DomainError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(DomainError::InvalidCredentials) => (
                StatusCode::BAD_REQUEST,
                "Unable to log in with provided credentials.".to_string(),
            ),
            ApiError::Domain(DomainError::Unauthorized(msg)) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Domain(DomainError::Forbidden(msg)) => (StatusCode::FORBIDDEN, msg),
            ApiError::Domain(DomainError::Infra(err)) => {
                error!(error = %err, "Request failed on infrastructure error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed.".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let mut response = (status, Json(ApiResponse::<()>::error(message))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(TOKEN_KEYWORD),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::InfraError;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::not_found("Course", "id", 7), StatusCode::NOT_FOUND),
            (DomainError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (DomainError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (DomainError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (
                DomainError::Infra(InfraError::Database(sea_orm::DbErr::Custom("boom".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), expected);
        }
    }

    #[test]
    fn unauthorized_carries_token_challenge() {
        let resp = ApiError::from(DomainError::Unauthorized("no".into())).into_response();
        assert_eq!(resp.headers()[header::WWW_AUTHENTICATE], "Token");
    }

    #[test]
    fn method_not_allowed_is_405() {
        assert_eq!(
            ApiError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
