//! Request extractors: the bearer token user and JSON, path and query
//! wrappers that reject with [`ApiError`].

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use roombook_auth::token::validate_access_token;
use roombook_auth::{AccessTokenClaims, AuthError};
use roombook_core::error::RoombookError;
use roombook_core::models::user::UserRole;
use roombook_core::repository::UserRepository;
use roombook_core::service::Actor;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller identified by a valid `Authorization: Bearer <jwt>` header.
///
/// The token only identifies the user; the role and active flag are read
/// from the user record on every request, so deactivation and role changes
/// take effect before the token expires.
#[derive(Debug, Clone)]
pub struct AuthorizedUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub claims: AccessTokenClaims,
}

impl AuthorizedUser {
    pub fn id(&self) -> Uuid {
        self.user_id
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }

    /// Campus, room and user administration.
    pub fn require_manager(&self) -> Result<(), ApiError> {
        if self.role.can_manage_facilities() {
            Ok(())
        } else {
            Err(ApiError::forbidden("manager role required"))
        }
    }

    pub fn require_moderator(&self) -> Result<(), ApiError> {
        if self.role.can_moderate_bookings() {
            Ok(())
        } else {
            Err(ApiError::forbidden("booking moderator role required"))
        }
    }
}

impl FromRequestParts<AppState> for AuthorizedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?
            .to_str()
            .map_err(|_| ApiError::unauthorized("malformed authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("expected a bearer token"))?;

        let claims = validate_access_token(token, state.auth_config())?;
        let user = match state.user_repository().get_by_id(claims.user_id()?).await {
            Ok(user) => user,
            Err(RoombookError::NotFound { .. }) => {
                return Err(ApiError::unauthorized("unknown user"));
            }
            Err(e) => return Err(e.into()),
        };
        if !user.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        Ok(Self {
            user_id: user.id,
            role: user.role,
            claims,
        })
    }
}

/// `axum::Json` whose rejections answer with the API's `{ "message" }` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// `axum::extract::Path` with the API's error body.
#[derive(Debug)]
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `axum::extract::Query` with the API's error body.
#[derive(Debug)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}
