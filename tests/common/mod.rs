//! Shared fixture for the HTTP flow tests.
//!
//! Every test gets its own in-memory database and router.

#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use course_enrollment::application::identity::RegisterUser;
use course_enrollment::domain::{Course, CreateCourseDto, User};
use course_enrollment::interfaces::http::router::SessionSettings;
use course_enrollment::{create_api_router, init_database_with_migrations, ApiState, DatabaseConfig};

pub const PASSWORD: &str = "12345";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("body is not JSON")
    }

    /// Value of the `sessionid` cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| *name == "sessionid")
            .map(|(_, value)| value.to_string())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: ApiState,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = init_database_with_migrations(&DatabaseConfig::in_memory())
            .await
            .expect("migrations");
        let state = ApiState::new(db, SessionSettings::default());
        let router = create_api_router(state.clone());
        Self { router, state }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn create_course(&self, title: &str, price: i32, duration: i32) -> Course {
        self.state
            .repos
            .courses()
            .create(CreateCourseDto {
                title: title.to_string(),
                price,
                date_start: Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap(),
                duration,
            })
            .await
            .expect("course")
    }

    pub async fn create_user(&self, username: &str) -> User {
        self.state
            .user_service
            .register(RegisterUser {
                username: username.to_string(),
                password: PASSWORD.to_string(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
            })
            .await
            .expect("user")
    }

    pub async fn create_staff(&self, username: &str) -> User {
        self.state
            .user_service
            .create_superuser(username, "staff@example.com", PASSWORD)
            .await
            .expect("staff")
    }

    pub async fn token_for(&self, user: &User) -> String {
        self.state
            .user_service
            .ensure_token(user.id)
            .await
            .expect("token")
            .key
    }

    pub async fn user_count(&self) -> u64 {
        self.state.user_service.count_users().await.expect("count")
    }
}

pub fn request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

pub fn empty(builder: axum::http::request::Builder) -> Request<Body> {
    builder.body(Body::empty()).expect("request")
}

pub fn json(builder: axum::http::request::Builder, body: Value) -> Request<Body> {
    builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn with_token(builder: axum::http::request::Builder, token: &str) -> axum::http::request::Builder {
    builder.header(header::AUTHORIZATION, format!("Token {token}"))
}

pub fn with_session(builder: axum::http::request::Builder, key: &str) -> axum::http::request::Builder {
    builder.header(header::COOKIE, format!("sessionid={key}"))
}
