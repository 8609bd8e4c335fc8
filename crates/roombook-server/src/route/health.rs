use axum::Router;
use axum::routing::get;

use crate::handler::health::{health_check, health_check_db};
use crate::state::AppState;

pub fn build_health_check_routers() -> Router<AppState> {
    let routers = Router::new()
        .route("/", get(health_check))
        .route("/db", get(health_check_db));
    Router::new().nest("/health", routers)
}
