//! Vote page endpoint

use axum::{extract::State, response::Html, routing::get, Router};
use tracing::{debug, warn};
use vote_core::{ViewModel, VoteSet};

use crate::{render::render_page, AppState};

/// Create vote page routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(vote_page))
}

/// Fetch, sort and render the current votes
///
/// Upstream failures never fail the request: the page renders without votes.
async fn vote_page(State(state): State<AppState>) -> Html<String> {
    let votes = match state.aggregator.fetch().await {
        Ok(votes) => votes,
        Err(e) => {
            warn!(kind = %e.kind(), status = ?e.status(), "Rendering page without votes: {}", e);
            VoteSet::default()
        }
    };

    let view = ViewModel::build(votes);
    debug!(total = view.total(), "emojis: {:?}", view.items());

    Html(render_page(&view))
}
