//! Client state that persists across restarts.
//!
//! Persistence works by allow-list: this struct IS the allow-list. Saving
//! serializes exactly these fields and nothing else, so transient state
//! (loading flags, cart/notification mirrors, the realtime connection)
//! cannot leak into storage by accident.

use serde::{Deserialize, Serialize};

/// The full set of client state that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PersistedState {
    /// Bearer token of the last authenticated session, if any.
    pub auth_token: Option<String>,
    /// Most-recent-first search history.
    #[serde(default)]
    pub recent_searches: Vec<String>,
    /// Product ids selected for comparison.
    #[serde(default)]
    pub comparison: Vec<String>,
}

impl PersistedState {
    pub fn new() -> Self {
        Self::default()
    }
}
