//! State repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::PersistedState;

/// Repository for the persisted client state.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Saves the full persisted state to storage.
    async fn save_state(&self, state: PersistedState) -> Result<()>;

    async fn get_state(&self) -> Result<PersistedState>;

    async fn get_auth_token(&self) -> Option<String>;

    async fn set_auth_token(&self, token: String) -> Result<()>;

    async fn clear_auth_token(&self) -> Result<()>;

    async fn set_recent_searches(&self, searches: Vec<String>) -> Result<()>;

    async fn set_comparison(&self, comparison: Vec<String>) -> Result<()>;
}
