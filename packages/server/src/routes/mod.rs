use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(feed_routes())
        .nest("/image-lab", image_lab_routes())
        .route("/static/capture.js", get(handlers::assets::capture_script))
        .route("/healthz", get(handlers::assets::health))
}

fn feed_routes() -> Router<AppState> {
    let submit = Router::new()
        .route("/submit", post(handlers::feed::submit))
        .layer(handlers::feed::submit_body_limit());

    Router::new()
        .route("/", get(handlers::feed::index))
        .route("/delete", post(handlers::feed::delete))
        .merge(submit)
}

fn image_lab_routes() -> Router<AppState> {
    let generate = Router::new()
        .route("/generate", post(handlers::image_lab::generate))
        .layer(handlers::image_lab::generate_body_limit());

    Router::new()
        .route("/", get(handlers::image_lab::page))
        .merge(generate)
}
