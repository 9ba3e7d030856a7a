use common::types::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("read failure: {0}")]
    Read(String),
    #[error("write failure: {0}")]
    Write(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }

    /// Wire code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Read(_) => ErrorCode::ReadFailure,
            Self::Write(_) => ErrorCode::WriteFailure,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }
}
