//! Search history and product-comparison bookkeeping.
//!
//! Purely local state: no network, no dependency on authentication. The
//! recent-searches list and the comparison set persist across restarts
//! (see [`crate::state`]), the current query does not.

use serde::{Deserialize, Serialize};

/// Maximum number of recent searches kept.
pub const RECENT_SEARCH_LIMIT: usize = 10;

/// Maximum number of products in the comparison set.
pub const COMPARISON_LIMIT: usize = 5;

/// UI-level search history and bounded product-comparison set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchTracker {
    /// Current search query. Not persisted.
    pub query: String,
    /// Most-recent-first, deduplicated, at most [`RECENT_SEARCH_LIMIT`].
    pub recent_searches: Vec<String>,
    /// Insertion-ordered product ids, at most [`COMPARISON_LIMIT`], no duplicates.
    pub comparison: Vec<String>,
}

impl SearchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the persisted lists, leaving the current query empty.
    pub fn restore(recent_searches: Vec<String>, comparison: Vec<String>) -> Self {
        Self {
            query: String::new(),
            recent_searches,
            comparison,
        }
    }

    /// Replaces the current query. No history side effect.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Prepends a query to the recent-searches list.
    ///
    /// Dedup is by exact string match: re-recording an existing query
    /// moves it to the front instead of duplicating it. The list is
    /// truncated to the most recent [`RECENT_SEARCH_LIMIT`] entries.
    /// Blank queries are ignored.
    pub fn record_recent(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query.trim().is_empty() {
            return;
        }
        self.recent_searches.retain(|existing| *existing != query);
        self.recent_searches.insert(0, query);
        self.recent_searches.truncate(RECENT_SEARCH_LIMIT);
    }

    /// Appends a product id to the comparison set.
    ///
    /// Silent no-op when the set is full or the id is already present;
    /// callers are expected to check [`Self::comparison_is_full`] before
    /// prompting the user. Returns whether the id was added.
    pub fn add_to_comparison(&mut self, product_id: impl Into<String>) -> bool {
        let product_id = product_id.into();
        if self.comparison.len() >= COMPARISON_LIMIT || self.comparison.contains(&product_id) {
            return false;
        }
        self.comparison.push(product_id);
        true
    }

    /// Removes a product id from the comparison set, if present.
    pub fn remove_from_comparison(&mut self, product_id: &str) {
        self.comparison.retain(|existing| existing != product_id);
    }

    /// Empties the comparison set.
    pub fn clear_comparison(&mut self) {
        self.comparison.clear();
    }

    pub fn comparison_is_full(&self) -> bool {
        self.comparison.len() >= COMPARISON_LIMIT
    }
}
