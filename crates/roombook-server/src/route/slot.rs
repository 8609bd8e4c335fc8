use axum::Router;
use axum::routing::get;

use crate::handler::slot::show_slot_list;
use crate::state::AppState;

pub fn build_slot_routers() -> Router<AppState> {
    Router::new().route("/slots", get(show_slot_list))
}
