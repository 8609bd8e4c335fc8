//! Mapping of domain errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roombook_auth::AuthError;
use roombook_core::error::RoombookError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] RoombookError);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self(RoombookError::AuthenticationFailed {
            reason: reason.into(),
        })
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self(RoombookError::AuthorizationDenied {
            reason: reason.into(),
        })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(RoombookError::validation(message))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RoombookError::Validation { .. } | RoombookError::InvalidTransition { .. } => {
                StatusCode::BAD_REQUEST
            }
            RoombookError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            RoombookError::AuthorizationDenied { .. } => StatusCode::FORBIDDEN,
            RoombookError::NotFound { .. } => StatusCode::NOT_FOUND,
            RoombookError::Conflict { .. } | RoombookError::AlreadyExists { .. } => {
                StatusCode::CONFLICT
            }
            RoombookError::Database(_) | RoombookError::Crypto(_) | RoombookError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl From<garde::Report> for ApiError {
    fn from(report: garde::Report) -> Self {
        Self::bad_request(report.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error.message = %self.0, "Request failed");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
