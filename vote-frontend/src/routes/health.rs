//! Health check endpoint

use axum::{http::StatusCode, routing::any, Router};

use crate::AppState;

/// Liveness probe: always OK with an empty body
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/_healthcheck", any(health_check))
}
