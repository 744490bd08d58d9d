use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// Login failures. Kept distinct from `Validation` so the reason can be
    /// logged, but both map to 400 at the HTTP boundary.
    #[error("Unable to log in with provided credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Whether the underlying cause is a storage-level unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DomainError::Infra(InfraError::Database(e)) => {
                let msg = e.to_string();
                msg.contains("UNIQUE") || msg.contains("duplicate")
            }
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(#[from] bcrypt::BcryptError),
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Infra(InfraError::Database(e))
    }
}

impl From<bcrypt::BcryptError> for DomainError {
    fn from(e: bcrypt::BcryptError) -> Self {
        DomainError::Infra(InfraError::Crypto(e))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
