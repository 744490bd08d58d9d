//! Course domain entities

use chrono::{DateTime, Utc};

/// A course users can sign up for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i32,
    pub title: String,
    /// Price in whole currency units
    pub price: i32,
    pub date_start: DateTime<Utc>,
    /// Length of the course in days
    pub duration: i32,
}

/// A user signed up for a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub user_id: i32,
    pub course_id: i32,
    pub created_at: DateTime<Utc>,
}
