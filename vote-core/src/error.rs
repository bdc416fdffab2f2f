//! Error types for fetching votes from the upstream aggregator

use std::fmt;

use thiserror::Error;

/// Failure while fetching the current vote set
///
/// None of these are fatal to a page request: the caller renders an empty
/// vote set instead.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, or the body could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream answered with something other than 200 OK
    #[error("Upstream error: unexpected status {status}")]
    Upstream { status: u16 },

    /// Upstream body did not match the expected payload shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn transport(msg: impl Into<String>) -> Self {
        FetchError::Transport(msg.into())
    }

    pub fn upstream(status: u16) -> Self {
        FetchError::Upstream { status }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        FetchError::Decode(msg.into())
    }

    /// Classification of this error without its payload
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) => FetchErrorKind::Transport,
            FetchError::Upstream { .. } => FetchErrorKind::Upstream,
            FetchError::Decode(_) => FetchErrorKind::Decode,
        }
    }

    /// Upstream status code, if the upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

/// Fetch error classification recorded in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Transport,
    Upstream,
    Decode,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Transport => "TransportError",
            FetchErrorKind::Upstream => "UpstreamError",
            FetchErrorKind::Decode => "DecodeError",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
