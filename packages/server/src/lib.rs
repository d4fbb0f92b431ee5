pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod render;
pub mod routes;
pub mod service;
pub mod state;
pub mod storage;
pub mod utils;

use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
