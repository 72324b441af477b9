//! Product routes. The capitalized `/Products` path is part of the public API.

use crate::handlers::products::{create, delete, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/Products", get(list).post(create).put(update).delete(delete))
        .route("/Products/:id", get(read))
        .with_state(state)
}
