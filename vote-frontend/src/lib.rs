//! Emoji vote frontend
//!
//! Serves an HTML page listing the current emoji vote counts fetched from
//! the aggregation service, lowest count first, with each symbol's share of
//! the total.

pub mod config;
pub mod render;
mod routes;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use vote_client::AggregatorClient;

use config::FrontendConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<AggregatorClient>,
}

impl AppState {
    pub fn new(aggregator: AggregatorClient) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

/// Build the frontend router
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the frontend router from configuration
///
/// The upstream client gets `fetch_timeout`, the serving layer gets
/// `request_timeout`, so a hanging upstream still yields an empty page.
pub fn router(config: &FrontendConfig) -> anyhow::Result<Router> {
    let aggregator = AggregatorClient::new(config.upstream_url.clone(), config.fetch_timeout)
        .context("Failed to create HTTP client")?;
    info!(
        "Fetching votes from {} (fetch timeout {:?}, request timeout {:?})",
        aggregator.endpoint(),
        config.fetch_timeout,
        config.request_timeout
    );

    Ok(app(AppState::new(aggregator), config.request_timeout))
}
