//! Search slice actions.
//!
//! The tracker itself is pure and lives in the core crate; this module
//! wires its mutations to the store and writes the persisted lists
//! through best-effort. The in-memory tracker is the UI's source of
//! truth, so a failed save only costs restoration on the next launch.

use tracing::warn;

use matmart_core::search::SearchTracker;
use matmart_core::state::StateRepository;

use crate::store::Store;

impl Store {
    /// Replaces the current search query. No history side effect.
    pub async fn set_search_query(&self, query: &str) {
        self.search.write().await.set_query(query);
    }

    /// Records a submitted search in the recent-searches list.
    pub async fn record_recent_search(&self, query: &str) {
        let recents = {
            let mut tracker = self.search.write().await;
            tracker.record_recent(query);
            tracker.recent_searches.clone()
        };
        if let Err(e) = self.state_repository.set_recent_searches(recents).await {
            warn!("failed to persist recent searches: {e}");
        }
    }

    /// Adds a product to the comparison set.
    ///
    /// Returns whether the product was added; a full set or a duplicate
    /// id is a silent no-op.
    pub async fn add_to_comparison(&self, product_id: &str) -> bool {
        let (added, comparison) = {
            let mut tracker = self.search.write().await;
            let added = tracker.add_to_comparison(product_id);
            (added, tracker.comparison.clone())
        };
        if added {
            self.persist_comparison(comparison).await;
        }
        added
    }

    /// Removes a product from the comparison set.
    pub async fn remove_from_comparison(&self, product_id: &str) {
        let comparison = {
            let mut tracker = self.search.write().await;
            tracker.remove_from_comparison(product_id);
            tracker.comparison.clone()
        };
        self.persist_comparison(comparison).await;
    }

    /// Empties the comparison set.
    pub async fn clear_comparison(&self) {
        let comparison = {
            let mut tracker = self.search.write().await;
            tracker.clear_comparison();
            tracker.comparison.clone()
        };
        self.persist_comparison(comparison).await;
    }

    /// Returns a copy of the search tracker.
    pub async fn search_snapshot(&self) -> SearchTracker {
        self.search.read().await.clone()
    }

    async fn persist_comparison(&self, comparison: Vec<String>) {
        if let Err(e) = self.state_repository.set_comparison(comparison).await {
            warn!("failed to persist comparison set: {e}");
        }
    }
}
