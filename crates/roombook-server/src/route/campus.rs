use axum::Router;
use axum::routing::get;

use crate::handler::campus::{create_campus, show_campus, show_campus_list, update_campus};
use crate::state::AppState;

pub fn build_campus_routers() -> Router<AppState> {
    let routers = Router::new()
        .route("/", get(show_campus_list).post(create_campus))
        .route("/{campus_id}", get(show_campus).put(update_campus));
    Router::new().nest("/campuses", routers)
}
