use axum::Router;
use axum::routing::{get, put};

use crate::handler::room::{
    create_room, disable_room, enable_room, show_room, show_room_by_code, show_room_list,
    show_room_slots, show_rooms_by_campus, update_room,
};
use crate::state::AppState;

pub fn build_room_routers() -> Router<AppState> {
    let routers = Router::new()
        .route("/", get(show_room_list).post(create_room))
        .route("/by-campus", get(show_rooms_by_campus))
        .route("/by-code-and-campus", get(show_room_by_code))
        .route("/{room_id}", get(show_room).put(update_room))
        .route("/{room_id}/slots", get(show_room_slots))
        .route("/{room_id}/enable", put(enable_room))
        .route("/{room_id}/disable", put(disable_room));
    Router::new().nest("/rooms", routers)
}
