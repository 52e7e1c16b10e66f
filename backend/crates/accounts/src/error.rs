//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Bad username/password at login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired, or mis-signed bearer token
    #[error("Unauthorized")]
    InvalidToken,

    /// Token issuance failed during login
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Malformed input (username, email, password policy)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No record for the given id or username
    #[error("Account not found")]
    NotFound,

    /// Store-level failure while creating an account
    #[error("Failed to create account")]
    CreationFailed,

    /// Store-level failure while updating an account
    #[error("Failed to update account")]
    UpdateFailed,

    /// Store-level failure while deleting an account
    #[error("Failed to delete account")]
    DeletionFailed,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::InvalidCredentials
            | AccountError::InvalidToken
            | AccountError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            AccountError::Validation(_)
            | AccountError::CreationFailed
            | AccountError::UpdateFailed
            | AccountError::DeletionFailed => StatusCode::BAD_REQUEST,
            AccountError::NotFound => StatusCode::NOT_FOUND,
            AccountError::Database(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::InvalidCredentials
            | AccountError::InvalidToken
            | AccountError::AuthenticationFailed => ErrorKind::Unauthorized,
            AccountError::Validation(_)
            | AccountError::CreationFailed
            | AccountError::UpdateFailed
            | AccountError::DeletionFailed => ErrorKind::BadRequest,
            AccountError::NotFound => ErrorKind::NotFound,
            AccountError::Database(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError.
    ///
    /// Server-side failures render with a generic message; SQL text and
    /// internal detail stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Database(_) | AccountError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            AccountError::AuthenticationFailed => {
                tracing::error!("Token issuance failed");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AccountError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AccountError::Validation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AccountError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AccountError::Internal(err.to_string())
    }
}
