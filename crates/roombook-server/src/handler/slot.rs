use axum::extract::State;
use roombook_core::repository::SlotRepository;

use crate::error::ApiResult;
use crate::extractor::Json;
use crate::model::slot::SlotResponse;
use crate::state::AppState;

pub async fn show_slot_list(State(state): State<AppState>) -> ApiResult<Json<Vec<SlotResponse>>> {
    let slots = state.slot_repository().list().await?;
    Ok(Json(slots.into_iter().map(SlotResponse::from).collect()))
}
