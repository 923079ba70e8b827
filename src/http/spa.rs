//! Single-page app fallback.
//!
//! Client-side routes have no file on disk, so every unmatched GET is
//! answered with `index.html` and the app's router takes it from there.
//! Paths under `/api/` and `/static/` are excluded: a miss there is a real
//! 404, not a page.

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::http::server::AppState;

const RESERVED_PREFIXES: &[&str] = &["/api/", "/static/"];

/// Paths that must never fall back to the app shell.
pub fn is_reserved_path(path: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

pub async fn spa_fallback(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request.uri().path();

    if is_reserved_path(path) {
        tracing::debug!(path = %path, "No asset for reserved path");
        return StatusCode::NOT_FOUND.into_response();
    }

    if request.method() != Method::GET && request.method() != Method::HEAD {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET, HEAD")],
        )
            .into_response();
    }

    let index = state.assets_dir.join("index.html");
    match ServeFile::new(index).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
