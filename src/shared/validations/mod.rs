//! Request-level validation helpers shared by the HTTP DTOs.

use serde::{Deserialize, Deserializer};
use validator::{ValidateEmail, ValidationError};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Number(serde_json::Number),
}

/// Accepts a JSON string or number and yields its text form.
///
/// Clients are known to post numeric passwords (`"password": 12345`);
/// those are taken as their decimal text rather than rejected. Floats keep
/// their fractional part, so `1.0` stays `"1.0"`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Str(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}

/// Letters, digits and `@ . + - _` only.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("username");
        err.message = Some(
            "may contain only letters, numbers, and @/./+/-/_ characters".into(),
        );
        Err(err)
    }
}

/// Blank is allowed; anything else must look like an email address.
pub fn validate_blank_or_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        let mut err = ValidationError::new("email");
        err.message = Some("enter a valid email address".into());
        Err(err)
    }
}
