//! Core types for the vote frontend
//!
//! This crate defines the vote data fetched from the upstream aggregation
//! service, the fetch error taxonomy, and the presentation logic that turns
//! an unordered vote set into a sorted, percentage-annotated view.

pub mod error;
pub mod vote;
pub mod view;

pub use error::{FetchError, FetchErrorKind, FetchResult};
pub use view::{iterate, percentage, sum, ViewModel};
pub use vote::{VoteItem, VoteSet};
