use axum::extract::State;
use axum::http::StatusCode;
use garde::Validate;
use roombook_core::repository::RoomRepository;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractor::{AuthorizedUser, Json, Path, Query};
use crate::model::booking::RoomSlotBody;
use crate::model::pagination::{PageQuery, PaginatedResponse};
use crate::model::room::{
    CreateRoomRequest, RoomByCodeQuery, RoomResponse, RoomsByCampusQuery, UpdateRoomRequest,
};
use crate::state::AppState;

pub async fn show_room_list(
    Query(query): Query<PageQuery>,
    State(state): State<AppState>,
) -> ApiResult<Json<PaginatedResponse<RoomResponse>>> {
    let page = state.room_repository().list(query.try_into()?).await?;
    Ok(Json(page.into()))
}

pub async fn show_rooms_by_campus(
    Query(query): Query<RoomsByCampusQuery>,
    State(state): State<AppState>,
) -> ApiResult<Json<PaginatedResponse<RoomResponse>>> {
    let page = state
        .room_repository()
        .list_by_campus(query.campus_id, query.page().try_into()?)
        .await?;
    Ok(Json(page.into()))
}

pub async fn show_room_by_code(
    Query(query): Query<RoomByCodeQuery>,
    State(state): State<AppState>,
) -> ApiResult<Json<RoomResponse>> {
    let room = state
        .room_repository()
        .get_by_code(query.campus_id, &query.code)
        .await?;
    Ok(Json(room.into()))
}

pub async fn show_room(
    Path(room_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<RoomResponse>> {
    let room = state.room_repository().get_by_id(room_id).await?;
    Ok(Json(room.into()))
}

pub async fn show_room_slots(
    Path(room_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoomSlotBody>>> {
    let roomslots = state.room_repository().list_roomslots(room_id).await?;
    Ok(Json(roomslots.into_iter().map(RoomSlotBody::from).collect()))
}

pub async fn create_room(
    user: AuthorizedUser,
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> ApiResult<(StatusCode, Json<RoomResponse>)> {
    user.require_manager()?;
    req.validate()?;

    let room = state.room_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(room.into())))
}

pub async fn update_room(
    user: AuthorizedUser,
    Path(room_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(req): Json<UpdateRoomRequest>,
) -> ApiResult<Json<RoomResponse>> {
    user.require_manager()?;
    req.validate()?;

    let room = state.room_repository().update(room_id, req.into()).await?;
    Ok(Json(room.into()))
}

pub async fn enable_room(
    user: AuthorizedUser,
    Path(room_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<RoomResponse>> {
    user.require_manager()?;
    let room = state.room_repository().set_available(room_id, true).await?;
    Ok(Json(room.into()))
}

pub async fn disable_room(
    user: AuthorizedUser,
    Path(room_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<RoomResponse>> {
    user.require_manager()?;
    let room = state.room_repository().set_available(room_id, false).await?;
    Ok(Json(room.into()))
}
