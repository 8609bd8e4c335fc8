use axum::extract::State;
use axum::http::StatusCode;
use garde::Validate;
use roombook_core::repository::CampusRepository;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractor::{AuthorizedUser, Json, Path};
use crate::model::campus::{CampusResponse, CreateCampusRequest, UpdateCampusRequest};
use crate::state::AppState;

pub async fn show_campus_list(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CampusResponse>>> {
    let campuses = state.campus_repository().list().await?;
    Ok(Json(campuses.into_iter().map(CampusResponse::from).collect()))
}

pub async fn show_campus(
    Path(campus_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<CampusResponse>> {
    let campus = state.campus_repository().get_by_id(campus_id).await?;
    Ok(Json(campus.into()))
}

pub async fn create_campus(
    user: AuthorizedUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCampusRequest>,
) -> ApiResult<(StatusCode, Json<CampusResponse>)> {
    user.require_manager()?;
    req.validate()?;

    let campus = state.campus_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(campus.into())))
}

pub async fn update_campus(
    user: AuthorizedUser,
    Path(campus_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(req): Json<UpdateCampusRequest>,
) -> ApiResult<Json<CampusResponse>> {
    user.require_manager()?;
    req.validate()?;

    let campus = state
        .campus_repository()
        .update(campus_id, req.into())
        .await?;
    Ok(Json(campus.into()))
}
