use axum::{http::header, response::IntoResponse};

/// GET /assets/bookmark-bus.js — the change notification bus script,
/// embedded at compile time so the binary ships self-contained.
pub async fn bus_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        include_str!("../assets/bookmark-bus.js"),
    )
}
