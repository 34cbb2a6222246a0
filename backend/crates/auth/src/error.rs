//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::envelope::Envelope;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Component name attached to boundary log records
pub const COMPONENT: &str = "user_controller";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Required field missing or malformed
    #[error("{0}")]
    Validation(AppError),

    /// Credentials did not match
    #[error("Unauthorized")]
    Unauthorized,

    /// Error raised by the model gateway, passed through unchanged
    #[error("{0}")]
    Persistence(AppError),

    /// Hashing or digest failure
    #[error("Password error: {0}")]
    Password(#[from] PasswordHashError),

    /// Operation exists but has no implementation yet
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(e) | AuthError::Persistence(e) => e.kind(),
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::NotImplemented(_) => ErrorKind::NotImplemented,
            AuthError::Password(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Message safe to hand back to the caller
    ///
    /// Internal failures only expose the reason phrase; their detail stays in
    /// the logs.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Validation(e) | AuthError::Persistence(e) => e.message().to_string(),
            AuthError::Password(_) | AuthError::Internal(_) => self.kind().as_str().to_string(),
            _ => self.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the failure of `operation` with a level matching its severity
    pub fn log(&self, operation: &'static str) {
        let status = self.status_code();
        match self {
            AuthError::Password(_) | AuthError::Internal(_) => {
                tracing::error!(operation, component = COMPONENT, status, error = %self, "Auth internal error");
            }
            AuthError::Persistence(e) if e.is_server_error() => {
                tracing::error!(operation, component = COMPONENT, status, error = ?e, "Model gateway error");
            }
            AuthError::Unauthorized => {
                tracing::warn!(operation, component = COMPONENT, status, error = %self, "Invalid login attempt");
            }
            AuthError::NotImplemented(_) => {
                tracing::warn!(operation, component = COMPONENT, status, error = %self, "Unimplemented operation called");
            }
            _ => {
                tracing::debug!(operation, component = COMPONENT, status, error = %self, "Auth error");
            }
        }
    }

    /// Log and convert into the error envelope returned to the caller
    pub fn into_envelope<T, M>(self, operation: &'static str) -> Envelope<T, M> {
        self.log(operation);
        Envelope::error(self.status_code(), self.public_message())
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Persistence(err)
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Persistence(AppError::from(err))
    }
}
