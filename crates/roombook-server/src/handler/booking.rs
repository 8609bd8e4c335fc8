use axum::extract::State;
use axum::http::StatusCode;
use garde::Validate;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractor::{AuthorizedUser, Json, Path, Query};
use crate::model::booking::{BookingResponse, CreateBookingRequest};
use crate::model::pagination::{PageQuery, PaginatedResponse};
use crate::state::AppState;

pub async fn create_booking(
    user: AuthorizedUser,
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    req.validate()?;

    let (date, pairs) = req.into_pairs();
    let booking = state
        .booking_service()
        .create(user.actor(), date, pairs)
        .await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn show_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<BookingResponse>> {
    let booking = state
        .booking_service()
        .get(user.actor(), booking_id)
        .await?;
    Ok(Json(booking.into()))
}

pub async fn show_history(
    user: AuthorizedUser,
    Query(query): Query<PageQuery>,
    State(state): State<AppState>,
) -> ApiResult<Json<PaginatedResponse<BookingResponse>>> {
    let page = state
        .booking_service()
        .history(user.actor(), query.try_into()?)
        .await?;
    Ok(Json(page.into()))
}

pub async fn show_pending(
    user: AuthorizedUser,
    Query(query): Query<PageQuery>,
    State(state): State<AppState>,
) -> ApiResult<Json<PaginatedResponse<BookingResponse>>> {
    user.require_moderator()?;

    let page = state
        .booking_service()
        .pending(user.actor(), query.try_into()?)
        .await?;
    Ok(Json(page.into()))
}

pub async fn approve_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<BookingResponse>> {
    let booking = state
        .booking_service()
        .approve(user.actor(), booking_id)
        .await?;
    Ok(Json(booking.into()))
}

pub async fn reject_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<BookingResponse>> {
    let booking = state
        .booking_service()
        .reject(user.actor(), booking_id)
        .await?;
    Ok(Json(booking.into()))
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<Uuid>,
    State(state): State<AppState>,
) -> ApiResult<Json<BookingResponse>> {
    let booking = state
        .booking_service()
        .cancel(user.actor(), booking_id)
        .await?;
    Ok(Json(booking.into()))
}
