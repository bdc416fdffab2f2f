//! HTTP route definitions

mod health;
mod votes;

use axum::Router;

use crate::AppState;

/// Create all frontend routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(votes::routes())
        .merge(health::routes())
}
