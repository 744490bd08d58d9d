//! Response envelope used for error bodies

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API envelope.
///
/// Resource endpoints answer with their bare DTOs; failures are always
/// reported as `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload. `null` on error
    pub data: Option<T>,
    /// Error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
