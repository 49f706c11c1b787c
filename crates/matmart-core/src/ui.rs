//! Shared UI flag state.
//!
//! Trivial bookkeeping with one invariant: at most one modal is active at
//! a time, which holds by construction (`active_modal` is an `Option`).
//! None of this state is persisted across restarts.

use std::collections::HashMap;

/// Sidebar, modal, and loading-flag bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct UiFlags {
    pub sidebar_collapsed: bool,
    /// Name of the currently active modal, if any. Opening a modal
    /// replaces whatever was active before.
    pub active_modal: Option<String>,
    /// Named boolean loading flags keyed by string.
    loading: HashMap<String, bool>,
}

impl UiFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Opens a modal, replacing any active one.
    pub fn open_modal(&mut self, name: impl Into<String>) {
        self.active_modal = Some(name.into());
    }

    pub fn close_modal(&mut self) {
        self.active_modal = None;
    }

    pub fn set_loading(&mut self, key: impl Into<String>, loading: bool) {
        let key = key.into();
        if loading {
            self.loading.insert(key, true);
        } else {
            self.loading.remove(&key);
        }
    }

    pub fn is_loading(&self, key: &str) -> bool {
        self.loading.get(key).copied().unwrap_or(false)
    }
}
