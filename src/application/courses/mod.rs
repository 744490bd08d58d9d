//! Courses module — catalogue reads, administration and signup

pub mod service;

pub use service::CourseService;
