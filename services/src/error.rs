use sea_orm::DbErr;
use thiserror::Error;

/// Failures surfaced by the workflow services.
///
/// The HTTP layer maps each variant to a status code; the message is what the
/// client sees in the `message` field of the error envelope.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Malformed data: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ServiceError::Forbidden(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    /// True for failures caused by the backing store rather than the caller.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ServiceError::Database(_) | ServiceError::Storage(_) | ServiceError::Serialization(_)
        )
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
