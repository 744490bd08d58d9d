//! Course DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Course, CreateCourseDto};

/// Canonical course representation.
///
/// Field order is part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseDto {
    pub id: i32,
    pub title: String,
    pub price: i32,
    pub date_start: DateTime<Utc>,
    /// Days
    pub duration: i32,
}

impl From<Course> for CourseDto {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            title: c.title,
            price: c.price,
            date_start: c.date_start,
            duration: c.duration,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i32,
    pub date_start: DateTime<Utc>,
    #[validate(range(min = 0, message = "duration must not be negative"))]
    pub duration: i32,
}

impl From<CreateCourseRequest> for CreateCourseDto {
    fn from(r: CreateCourseRequest) -> Self {
        Self {
            title: r.title,
            price: r.price,
            date_start: r.date_start,
            duration: r.duration,
        }
    }
}
