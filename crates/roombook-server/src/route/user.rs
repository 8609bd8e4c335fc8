use axum::Router;
use axum::routing::{get, post, put};

use crate::handler::user::{
    activate_user, change_password, deactivate_user, get_current_user, get_user, list_users,
    login, register, update_current_user, update_user,
};
use crate::state::AppState;

pub fn build_user_routers() -> Router<AppState> {
    let routers = Router::new()
        .route("/", get(list_users))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/me", get(get_current_user).put(update_current_user))
        .route("/me/change-password", put(change_password))
        .route("/{user_id}", get(get_user).put(update_user))
        .route("/{user_id}/activate", put(activate_user))
        .route("/{user_id}/deactivate", put(deactivate_user));
    Router::new().nest("/users", routers)
}
