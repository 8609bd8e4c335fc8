use axum::extract::State;
use axum::http::StatusCode;
use garde::Validate;
use roombook_core::models::user::UpdateUser;
use roombook_core::repository::UserRepository;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractor::{AuthorizedUser, Json, Path, Query};
use crate::model::pagination::{PageQuery, PaginatedResponse};
use crate::model::user::{
    AdminUpdateUserRequest, ChangePasswordRequest, LoginRequest, RegisterRequest,
    TokenResponse, UpdateProfileRequest, UserResponse,
};
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let output = state.auth_service().login(req.into()).await?;
    Ok(Json(output.into()))
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    req.validate()?;

    let output = state.auth_service().register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(output.into())))
}

pub async fn get_current_user(
    user: AuthorizedUser,
    State(state): State<AppState>,
) -> ApiResult<Json<UserResponse>> {
    let found = state.user_repository().get_by_id(user.id()).await?;
    Ok(Json(found.into()))
}

pub async fn update_current_user(
    user: AuthorizedUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate()?;

    let updated = state
        .user_repository()
        .update(user.id(), req.into())
        .await?;
    Ok(Json(updated.into()))
}

pub async fn change_password(
    user: AuthorizedUser,
    State(state): State<AppState>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    state
        .auth_service()
        .change_password(user.id(), &req.current_password, &req.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_users(
    user: AuthorizedUser,
    Query(query): Query<PageQuery>,
    State(state): State<AppState>,
) -> ApiResult<Json<PaginatedResponse<UserResponse>>> {
    user.require_manager()?;

    let page = state.user_repository().list(query.try_into()?).await?;
    Ok(Json(page.into()))
}

pub async fn get_user(
    user: AuthorizedUser,
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<UserResponse>> {
    user.require_manager()?;

    let found = state.user_repository().get_by_id(user_id).await?;
    Ok(Json(found.into()))
}

pub async fn update_user(
    user: AuthorizedUser,
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(req): Json<AdminUpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    user.require_manager()?;
    req.validate()?;

    let updated = state
        .user_repository()
        .update(user_id, req.try_into()?)
        .await?;
    Ok(Json(updated.into()))
}

pub async fn activate_user(
    user: AuthorizedUser,
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<UserResponse>> {
    set_active(user, user_id, state, true).await
}

pub async fn deactivate_user(
    user: AuthorizedUser,
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<UserResponse>> {
    set_active(user, user_id, state, false).await
}

async fn set_active(
    user: AuthorizedUser,
    user_id: Uuid,
    state: AppState,
    is_active: bool,
) -> ApiResult<Json<UserResponse>> {
    user.require_manager()?;

    let updated = state
        .user_repository()
        .update(
            user_id,
            UpdateUser {
                is_active: Some(is_active),
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(updated.into()))
}
