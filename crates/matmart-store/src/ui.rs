//! UI flag actions. Pure local state; nothing here talks to the network
//! or the state file.

use matmart_core::ui::UiFlags;

use crate::store::Store;

impl Store {
    /// Flips the sidebar between collapsed and expanded.
    pub async fn toggle_sidebar(&self) {
        self.ui.write().await.toggle_sidebar();
    }

    /// Opens the named modal, replacing any modal already active.
    pub async fn open_modal(&self, name: &str) {
        self.ui.write().await.open_modal(name);
    }

    /// Closes the active modal, if any.
    pub async fn close_modal(&self) {
        self.ui.write().await.close_modal();
    }

    /// Sets or clears a named loading flag.
    pub async fn set_loading(&self, key: &str, loading: bool) {
        self.ui.write().await.set_loading(key, loading);
    }

    /// Returns whether a named loading flag is set.
    pub async fn is_loading(&self, key: &str) -> bool {
        self.ui.read().await.is_loading(key)
    }

    /// Returns a copy of the UI flags.
    pub async fn ui_snapshot(&self) -> UiFlags {
        self.ui.read().await.clone()
    }
}
