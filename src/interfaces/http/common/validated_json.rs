//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value.
//! Both malformed bodies and failed validation answer 400 with the
//! field messages joined into the error text.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::DomainError;
use crate::interfaces::http::error::ApiError;

/// An extractor that deserializes JSON and validates it.
///
/// # Usage
///
/// ```ignore
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct SignupBody {
///     #[validate(length(min = 1, max = 150))]
///     username: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<SignupBody>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Error type for `ValidatedJson` extraction failures.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// JSON parsing failed.
    JsonError(JsonRejection),
    /// Validation failed.
    ValidationError(validator::ValidationErrors),
}

impl ValidatedJsonRejection {
    /// Human readable description of what was wrong with the body.
    pub fn message(&self) -> String {
        match self {
            Self::JsonError(rejection) => format!("Invalid JSON: {}", rejection.body_text()),
            Self::ValidationError(errors) => {
                let mut field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            format!("{}: {}", field, msg)
                        })
                    })
                    .collect();
                // HashMap order is arbitrary
                field_errors.sort();

                if field_errors.is_empty() {
                    "Validation failed".to_string()
                } else {
                    field_errors.join("; ")
                }
            }
        }
    }
}

impl From<ValidatedJsonRejection> for ApiError {
    fn from(rejection: ValidatedJsonRejection) -> Self {
        ApiError::Domain(DomainError::Validation(rejection.message()))
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10))]
        name: String,
        #[validate(range(min = 1, max = 100))]
        age: u32,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    fn json_request(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    async fn error_text(resp: axum::http::Response<Body>) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"name": "Alice", "age": 30});
        let resp = send(json_request(Body::from(serde_json::to_vec(&body).unwrap()))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let resp = send(json_request(Body::from("not json"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(error_text(resp).await.starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn validation_failure_returns_400_with_fields() {
        let body = serde_json::json!({"name": "", "age": 0});
        let resp = send(json_request(Body::from(serde_json::to_vec(&body).unwrap()))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let text = error_text(resp).await;
        assert!(text.contains("age: range"));
        assert!(text.contains("name: length"));
    }
}
