use axum::http::header;
use axum::response::IntoResponse;

const CAPTURE_JS: &str = include_str!("../../assets/capture.js");

/// `GET /static/capture.js`: the browser-side screenshot capture helper.
pub async fn capture_script() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        CAPTURE_JS,
    )
}

/// `GET /healthz`
pub async fn health() -> &'static str {
    "ok"
}
