//! Presentation view of a fetched vote set
//!
//! Orders the votes for display and exposes the helpers the page renderer
//! needs: a rank range, the vote total and integer percentages.

use crate::vote::{VoteItem, VoteSet};

/// Render-ready votes: sorted ascending by count, with the precomputed total
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    items: Vec<VoteItem>,
    total: u64,
}

impl ViewModel {
    /// Sort the fetched votes and compute their total
    ///
    /// The sort is stable: items with equal counts keep their upstream order.
    /// Lowest counts come first.
    pub fn build(votes: VoteSet) -> Self {
        let mut items = votes.into_inner();
        items.sort_by_key(|item| item.count);

        let total = sum(&items);

        Self { items, total }
    }

    /// Sorted items, lowest count first
    pub fn items(&self) -> &[VoteItem] {
        &self.items
    }

    /// Sum of all counts (0 for an empty view)
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Share of the total held by `item`, or `None` when there is nothing to divide by
    pub fn percentage_of(&self, item: &VoteItem) -> Option<u64> {
        percentage(item.count, self.total)
    }
}

/// Integer range `1..=n`, used by the renderer for row ranks
pub fn iterate(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

/// Sum of all counts, saturating at `u64::MAX`
pub fn sum(items: &[VoteItem]) -> u64 {
    items
        .iter()
        .fold(0u64, |acc, item| acc.saturating_add(item.count))
}

/// `floor(n * 100 / total)`
///
/// Returns `None` when `total` is zero. The renderer skips percentages for an
/// empty view, so `None` never reaches a page.
pub fn percentage(n: u64, total: u64) -> Option<u64> {
    if total == 0 {
        return None;
    }

    let pct = u128::from(n) * 100 / u128::from(total);
    Some(u64::try_from(pct).unwrap_or(u64::MAX))
}
