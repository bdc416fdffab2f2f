//! Upstream aggregation client for the vote frontend
//!
//! This crate fetches the current emoji vote counts from the aggregation
//! service and classifies every failure as a [`vote_core::FetchError`], so
//! callers can fall back to an empty vote set instead of failing a request.

pub mod client;
pub mod types;

pub use client::{upstream_endpoint, AggregatorClient};
pub use types::EmojisResponse;
