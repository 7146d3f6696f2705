//! Global application error types.
//!
//! This module defines the error type returned by the service layer. The API
//! layer turns it into an HTTP response in `api::common`.

use crate::utils::crypto::CryptoError;
use thiserror::Error;

/// Message returned whenever a presented token does not resolve to a user.
pub const NO_SUCH_TOKEN: &str = "no such token exists";

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid invite code")]
    InvalidInvite,

    #[error("malformed authorization header")]
    MalformedAuthHeader,

    #[error("no such token exists")]
    Unauthorized,

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database {
            source: error.into(),
        }
    }
}

impl From<CryptoError> for ServiceError {
    fn from(error: CryptoError) -> Self {
        Self::internal_error(format!("token cipher: {}", error))
    }
}
