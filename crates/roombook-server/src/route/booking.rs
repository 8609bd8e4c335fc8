use axum::Router;
use axum::routing::{get, post};

use crate::handler::booking::{
    approve_booking, cancel_booking, create_booking, reject_booking, show_booking,
    show_history, show_pending,
};
use crate::state::AppState;

pub fn build_booking_routers() -> Router<AppState> {
    let routers = Router::new()
        .route("/", post(create_booking))
        .route("/history", get(show_history))
        .route("/pending", get(show_pending))
        .route("/{booking_id}", get(show_booking))
        .route("/{booking_id}/approve", post(approve_booking))
        .route("/{booking_id}/reject", post(reject_booking))
        .route("/{booking_id}/cancel", post(cancel_booking));
    Router::new().nest("/bookings", routers)
}
