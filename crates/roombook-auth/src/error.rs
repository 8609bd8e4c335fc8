//! Authentication error types.

use roombook_core::error::RoombookError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user is deactivated")]
    AccountInactive,

    #[error("password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for RoombookError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::AccountInactive
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => RoombookError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::WeakPassword { .. } => RoombookError::Validation {
                message: err.to_string(),
            },
            AuthError::Crypto(msg) => RoombookError::Crypto(msg),
        }
    }
}
