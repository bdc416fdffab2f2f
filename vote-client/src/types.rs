//! Aggregation service response types

use serde::Deserialize;
use vote_core::{VoteItem, VoteSet};

/// Response from GET /tweets/emojis/
///
/// A missing `emojis` field decodes as an empty list; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EmojisResponse {
    #[serde(default)]
    pub emojis: Vec<VoteItem>,
}

impl EmojisResponse {
    pub fn into_vote_set(self) -> VoteSet {
        VoteSet::new(self.emojis)
    }
}
