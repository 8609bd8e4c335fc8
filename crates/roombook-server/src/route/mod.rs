mod booking;
mod campus;
mod health;
mod room;
mod slot;
mod user;

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

/// Routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    let router = Router::new()
        .merge(user::build_user_routers())
        .merge(booking::build_booking_routers())
        .merge(campus::build_campus_routers())
        .merge(room::build_room_routers())
        .merge(slot::build_slot_routers());
    Router::new().nest("/api", router)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::build_health_check_routers())
        .merge(api_routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(state)
}
