//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::identity::RegisterUser;
use crate::domain::User;
use crate::shared::validations::{lenient_string, validate_blank_or_email, validate_username};

/// Registration body. `username` and `password` may be sent as numbers.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(value_type = String)]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 150, message = "must be 1-150 characters"),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(value_type = String)]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub password: Option<String>,

    #[serde(default)]
    #[validate(
        length(max = 254, message = "must be at most 254 characters"),
        custom(function = "validate_blank_or_email")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub last_name: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(r: RegisterRequest) -> Self {
        Self {
            username: r.username.unwrap_or_default(),
            password: r.password.unwrap_or_default(),
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
        }
    }
}

/// Registration echo; never includes the password.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisteredUserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for RegisteredUserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(value_type = String)]
    #[validate(required(message = "This field is required."))]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(value_type = String)]
    #[validate(required(message = "This field is required."))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// Always `"Token"`
    pub token_type: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

impl From<User> for UserInfo {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            is_staff: u.is_staff,
        }
    }
}
