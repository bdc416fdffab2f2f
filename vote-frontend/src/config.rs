//! Frontend configuration loaded from environment variables

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tracing::{info, warn};
use vote_client::upstream_endpoint;

const ADDR_VAR: &str = "VOTE_ADDR";
const DISCOVERY_VAR: &str = "COPILOT_SERVICE_DISCOVERY_ENDPOINT";
const UPSTREAM_URL_VAR: &str = "VOTE_UPSTREAM_URL";
const REQUEST_TIMEOUT_VAR: &str = "VOTE_REQUEST_TIMEOUT_SECS";
const FETCH_TIMEOUT_VAR: &str = "VOTE_FETCH_TIMEOUT_SECS";

const DEFAULT_ADDR: &str = ":8080";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Runtime configuration for the frontend server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Address the HTTP server listens on
    pub addr: SocketAddr,
    /// Full URL of the upstream emoji vote endpoint
    pub upstream_url: String,
    /// Serving timeout per request
    pub request_timeout: Duration,
    /// Upstream fetch timeout, always shorter than `request_timeout`
    pub fetch_timeout: Duration,
}

impl FrontendConfig {
    /// Load configuration from the process environment
    ///
    /// Reads:
    /// - VOTE_ADDR: listen address, `:port` binds all interfaces (default `:8080`)
    /// - COPILOT_SERVICE_DISCOVERY_ENDPOINT: namespace of the aggregation service
    /// - VOTE_UPSTREAM_URL: full upstream URL, overrides the discovery namespace
    /// - VOTE_REQUEST_TIMEOUT_SECS: serving timeout per request (default 15)
    /// - VOTE_FETCH_TIMEOUT_SECS: upstream fetch timeout, below the request
    ///   timeout (default 80% of it)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = parse_addr(&addr)?;

        let upstream_url = match lookup(UPSTREAM_URL_VAR) {
            Some(url) => {
                info!("Using upstream override from {}: {}", UPSTREAM_URL_VAR, url);
                url
            }
            None => {
                let discovery = lookup(DISCOVERY_VAR).unwrap_or_default();
                if discovery.is_empty() {
                    warn!("{} not set, upstream host will not resolve", DISCOVERY_VAR);
                }
                upstream_endpoint(&discovery)
            }
        };

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            Some(raw) => parse_secs(REQUEST_TIMEOUT_VAR, &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let fetch_timeout = match lookup(FETCH_TIMEOUT_VAR) {
            Some(raw) => {
                let fetch_timeout = parse_secs(FETCH_TIMEOUT_VAR, &raw)?;
                if fetch_timeout >= request_timeout {
                    return Err(ConfigError::FetchTimeoutTooLong {
                        fetch: fetch_timeout,
                        request: request_timeout,
                    });
                }
                fetch_timeout
            }
            None => default_fetch_timeout(request_timeout),
        };

        Ok(Self {
            addr,
            upstream_url,
            request_timeout,
            fetch_timeout,
        })
    }
}

/// Fetch timeout derived from the request timeout: 80% of it
///
/// The fetch must give up before the serving timeout fires, otherwise the
/// request ends in 408 instead of an empty page.
pub fn default_fetch_timeout(request_timeout: Duration) -> Duration {
    request_timeout - request_timeout / 5
}

/// Parse a positive number of seconds
fn parse_secs(field: &str, raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    };

    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}

/// Parse a listen address, accepting the `:port` shorthand for all interfaces
fn parse_addr(raw: &str) -> Result<SocketAddr, ConfigError> {
    let raw = raw.trim();

    if let Some(port) = raw.strip_prefix(':') {
        let port: u16 = port
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(raw.to_string()))?;
        return Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)));
    }

    raw.parse()
        .map_err(|_| ConfigError::InvalidAddr(raw.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid listen address: {0}")]
    InvalidAddr(String),

    #[error("Invalid number in {field}: {value}")]
    InvalidNumber { field: String, value: String },

    #[error("Fetch timeout {fetch:?} must be shorter than request timeout {request:?}")]
    FetchTimeoutTooLong { fetch: Duration, request: Duration },
}
