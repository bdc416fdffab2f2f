//! Vote data structures as reported by the upstream aggregator

use serde::{Deserialize, Serialize};
use std::fmt;

/// One symbol's cumulative vote count at fetch time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteItem {
    /// Display token the votes are attributed to (usually an emoji)
    #[serde(rename = "emoji")]
    pub symbol: String,

    /// Number of votes counted for the symbol
    pub count: u64,
}

impl VoteItem {
    pub fn new(symbol: impl Into<String>, count: u64) -> Self {
        Self {
            symbol: symbol.into(),
            count,
        }
    }
}

impl fmt::Display for VoteItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.symbol, self.count)
    }
}

/// All vote items returned by a single fetch, in upstream order
///
/// Symbols are not deduplicated: if the upstream reports the same symbol
/// twice, both entries are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteSet(Vec<VoteItem>);

impl VoteSet {
    pub fn new(items: Vec<VoteItem>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VoteItem> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[VoteItem] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<VoteItem> {
        self.0
    }
}

impl FromIterator<VoteItem> for VoteSet {
    fn from_iter<I: IntoIterator<Item = VoteItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for VoteSet {
    type Item = VoteItem;
    type IntoIter = std::vec::IntoIter<VoteItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for VoteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}
