//! Course API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CourseDto, CreateCourseRequest};
use crate::application::{Authenticator, CourseService, RequestCredentials};
use crate::domain::DomainError;
use crate::interfaces::http::auth::require_user;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson, ValidatedJsonRejection};
use crate::interfaces::http::error::ApiError;

/// Course handler state
#[derive(Clone)]
pub struct CourseHandlerState {
    pub course_service: Arc<CourseService>,
    /// Token only; guards listing, detail and creation
    pub token_auth: Arc<dyn Authenticator>,
    /// Session or token; guards signup
    pub signup_auth: Arc<dyn Authenticator>,
}

/// Ids that do not parse can never match a course.
fn parse_course_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| DomainError::not_found("Course", "id", raw).into())
}

#[utoipa::path(
    get,
    path = "/courses/",
    tag = "Courses",
    responses(
        (status = 200, description = "All courses ordered by id", body = Vec<CourseDto>),
        (status = 401, description = "Missing or invalid token", body = ApiResponse<String>)
    ),
    security(("token_auth" = []))
)]
pub async fn list_courses(
    State(state): State<CourseHandlerState>,
    credentials: RequestCredentials,
) -> Result<Json<Vec<CourseDto>>, ApiError> {
    require_user(state.token_auth.as_ref(), &credentials).await?;

    let courses = state.course_service.list_courses().await?;
    Ok(Json(courses.into_iter().map(CourseDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/courses/{id}/",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = CourseDto),
        (status = 401, description = "Missing or invalid token", body = ApiResponse<String>),
        (status = 404, description = "No such course", body = ApiResponse<String>)
    ),
    security(("token_auth" = []))
)]
pub async fn get_course(
    State(state): State<CourseHandlerState>,
    credentials: RequestCredentials,
    Path(id): Path<String>,
) -> Result<Json<CourseDto>, ApiError> {
    require_user(state.token_auth.as_ref(), &credentials).await?;

    let id = parse_course_id(&id)?;
    let course = state.course_service.get_course(id).await?;
    Ok(Json(course.into()))
}

#[utoipa::path(
    post,
    path = "/courses/",
    tag = "Courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseDto),
        (status = 400, description = "Validation error", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token", body = ApiResponse<String>),
        (status = 403, description = "Caller is not staff", body = ApiResponse<String>)
    ),
    security(("token_auth" = []))
)]
pub async fn create_course(
    State(state): State<CourseHandlerState>,
    credentials: RequestCredentials,
    body: Result<ValidatedJson<CreateCourseRequest>, ValidatedJsonRejection>,
) -> Result<(StatusCode, Json<CourseDto>), ApiError> {
    // Authentication is decided before the body is looked at.
    let user = require_user(state.token_auth.as_ref(), &credentials).await?;
    state.course_service.ensure_can_manage(&user)?;
    let ValidatedJson(request) = body?;

    let course = state
        .course_service
        .create_course(&user, request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

#[utoipa::path(
    patch,
    path = "/courses/signup/{id}/",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Signed up; the course", body = CourseDto),
        (status = 401, description = "Not authenticated", body = ApiResponse<String>),
        (status = 404, description = "No such course", body = ApiResponse<String>)
    ),
    security(("token_auth" = []), ("session_cookie" = []))
)]
pub async fn signup(
    State(state): State<CourseHandlerState>,
    credentials: RequestCredentials,
    Path(id): Path<String>,
) -> Result<Json<CourseDto>, ApiError> {
    let user = require_user(state.signup_auth.as_ref(), &credentials).await?;

    let id = parse_course_id(&id)?;
    let course = state.course_service.signup(&user, id).await?;
    Ok(Json(course.into()))
}
