//! Aggregation service client
//!
//! Fetches the current vote counts over HTTP. Every failure is classified as
//! a [`FetchError`] and logged here; nothing in this module panics on
//! upstream behavior.

use crate::types::EmojisResponse;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{error, info, instrument, warn};
use vote_core::{FetchError, FetchResult, VoteSet};

/// Port the aggregation service listens on inside the service mesh
const UPSTREAM_PORT: u16 = 8080;

/// Path of the emoji vote counts endpoint
const EMOJIS_PATH: &str = "/tweets/emojis/";

/// Build the upstream URL from the service-discovery namespace
pub fn upstream_endpoint(discovery: &str) -> String {
    format!("http://api.{}:{}{}", discovery, UPSTREAM_PORT, EMOJIS_PATH)
}

/// Client for the upstream vote aggregation service
#[derive(Clone)]
pub struct AggregatorClient {
    client: Client,
    endpoint: String,
}

impl AggregatorClient {
    /// Create a client for the given emoji endpoint URL
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the current vote set, in upstream order
    ///
    /// Makes exactly one request. There is no retry.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch(&self) -> FetchResult<VoteSet> {
        let response = match self.client.get(&self.endpoint).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = FetchError::transport(e.to_string());
                warn!(kind = %err.kind(), timeout = e.is_timeout(), cause = %e, "Couldn't get emojis");
                return Err(err);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let err = FetchError::upstream(status.as_u16());
            warn!(kind = %err.kind(), status = status.as_u16(), "Unexpected vote response status");
            return Err(err);
        }

        let body = response.bytes().await.map_err(|e| {
            let err = FetchError::transport(format!("Failed to read emojis body: {}", e));
            warn!(kind = %err.kind(), cause = %e, "Couldn't read emojis body");
            err
        })?;

        let emojis: EmojisResponse = serde_json::from_slice(&body).map_err(|e| {
            let err = FetchError::decode(e.to_string());
            error!(kind = %err.kind(), cause = %e, "Failed to decode emojis");
            err
        })?;

        let votes = emojis.into_vote_set();
        info!(count = votes.len(), "Received emojis");
        Ok(votes)
    }
}
