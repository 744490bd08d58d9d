//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    http::{header, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Duration;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    Authenticator, AuthenticatorChain, CourseService, SessionAuthenticator, TokenAuthenticator,
    UserService,
};
use crate::domain::{DomainError, RepositoryProvider};
use crate::infrastructure::SeaOrmRepositoryProvider;
use crate::interfaces::http::auth::SESSION_COOKIE;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::error::ApiError;
use crate::interfaces::http::modules::{courses, health, users};

/// Session cookie settings the handlers need.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub ttl: Duration,
    pub secure_cookie: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::days(14),
            secure_cookie: false,
        }
    }
}

/// Unified state for every route. Handlers pull their own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub course_service: Arc<CourseService>,
    pub user_service: Arc<UserService>,
    pub token_auth: Arc<dyn Authenticator>,
    pub session_or_token_auth: Arc<dyn Authenticator>,
    pub session: SessionSettings,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    pub fn new(db: DatabaseConnection, session: SessionSettings) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let token_auth: Arc<dyn Authenticator> =
            Arc::new(TokenAuthenticator::new(repos.clone()));
        let session_or_token_auth: Arc<dyn Authenticator> = Arc::new(
            AuthenticatorChain::new()
                .with(Arc::new(SessionAuthenticator::new(repos.clone())))
                .with(token_auth.clone()),
        );

        Self {
            db,
            course_service: Arc::new(CourseService::new(repos.clone())),
            user_service: Arc::new(UserService::new(repos.clone(), session.ttl)),
            repos,
            token_auth,
            session_or_token_auth,
            session,
            started_at: Arc::new(Instant::now()),
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for courses::CourseHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        courses::CourseHandlerState {
            course_service: Arc::clone(&s.course_service),
            token_auth: Arc::clone(&s.token_auth),
            signup_auth: Arc::clone(&s.session_or_token_auth),
        }
    }
}

impl FromRef<ApiState> for users::UserHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        users::UserHandlerState {
            user_service: Arc::clone(&s.user_service),
            secure_cookie: s.session.secure_cookie,
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "`Token <key>` as returned by login",
                ))),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        courses::list_courses,
        courses::get_course,
        courses::create_course,
        courses::signup,
        users::register,
        users::login,
        users::logout,
    ),
    components(
        schemas(
            ApiResponse<String>,
            courses::CourseDto,
            courses::CreateCourseRequest,
            users::RegisterRequest,
            users::RegisteredUserDto,
            users::LoginRequest,
            users::LoginResponse,
            users::UserInfo,
            health::HealthResponse,
            health::HealthStatus,
            health::DatabaseHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Courses", description = "Course catalogue and signup"),
        (name = "Users", description = "Registration, login and logout"),
    ),
    info(
        title = "Course Enrollment API",
        version = "0.1.0",
        description = "Course listing and signup with token or session authentication"
    )
)]
pub struct ApiDoc;

/// Gives axum's bare 405 responses the standard JSON error body.
async fn method_not_allowed_as_json(response: Response) -> Response {
    if response.status() != axum::http::StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut replaced = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        replaced.headers_mut().insert(header::ALLOW, allow);
    }
    replaced
}

async fn route_not_found() -> ApiError {
    ApiError::Domain(DomainError::not_found("Route", "path", "unknown"))
}

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    // Cookies travel cross-origin, so origins are mirrored instead of `*`.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        // Courses
        .route(
            "/courses/",
            get(courses::list_courses).post(courses::create_course),
        )
        .route("/courses/{id}/", get(courses::get_course))
        .route(
            "/courses/signup/{id}/",
            post(courses::signup).patch(courses::signup),
        )
        // Users
        .route("/users/", post(users::register))
        .route("/users/login/", post(users::login))
        .route("/users/logout/", post(users::logout))
        .fallback(route_not_found)
        .with_state(state)
        .layer(middleware::map_response(method_not_allowed_as_json))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/courses/",
            "/courses/{id}/",
            "/courses/signup/{id}/",
            "/users/",
            "/users/login/",
            "/users/logout/",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
