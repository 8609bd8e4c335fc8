use axum::extract::State;
use axum::http::StatusCode;
use roombook_core::repository::SlotRepository;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Round-trips to the database through the slot table.
pub async fn health_check_db(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.slot_repository().list().await?;
    Ok(StatusCode::OK)
}
