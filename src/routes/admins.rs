//! Admin account routes.

use crate::handlers::admins::{delete, list, login, read, register, update};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/admins", get(list))
        .route("/admins/register", post(register))
        .route("/admins/login", post(login))
        .route("/admins/:id", get(read).put(update).delete(delete))
        .with_state(state)
}
