//! Error types for the Roombook system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoombookError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The requested room/slot selection clashes with an active booking or
    /// names a room/slot that cannot be booked.
    #[error("Booking conflict: {message}")]
    Conflict { message: String },

    #[error("Cannot {action} a booking that is {from}")]
    InvalidTransition { from: String, action: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RoombookError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type RoombookResult<T> = Result<T, RoombookError>;
