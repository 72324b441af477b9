//! Route tables and the assembled application router.

mod admins;
mod common;
mod products;

pub use admins::admin_routes;
pub use common::common_routes_with_ready;
pub use products::product_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: common, product and admin routes, with request tracing and a body size cap.
pub fn app_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(product_routes(state.clone()))
        .merge(admin_routes(state))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}
