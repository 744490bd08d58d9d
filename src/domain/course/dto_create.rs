use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct CreateCourseDto {
    pub title: String,
    pub price: i32,
    pub date_start: DateTime<Utc>,
    pub duration: i32,
}
