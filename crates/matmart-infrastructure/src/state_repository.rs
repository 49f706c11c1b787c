//! Persisted-state repository implementation.
//!
//! Reads and writes the persisted client state as a single TOML file and
//! caches it in memory to avoid repeated file I/O. Saving serializes the
//! [`PersistedState`] allow-list struct and nothing else, so transient
//! state cannot leak into storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use matmart_core::error::{MatmartError, Result};
use matmart_core::state::model::PersistedState;
use matmart_core::state::repository::StateRepository;

use crate::paths::MatmartPaths;

/// File-backed [`StateRepository`] with an in-memory cache.
#[derive(Clone)]
pub struct TomlStateRepository {
    /// Cached state loaded from storage.
    state: Arc<Mutex<PersistedState>>,
    /// Location of the state file.
    path: PathBuf,
}

impl TomlStateRepository {
    /// Creates a repository rooted at the platform config directory.
    pub fn new() -> Result<Self> {
        Self::with_base(None)
    }

    /// Creates a repository rooted at an explicit base directory.
    ///
    /// A missing or empty state file loads as the default state; a file
    /// that exists but cannot be parsed is an error (silently discarding
    /// a corrupt token would look like an unexplained logout).
    pub fn with_base(base: Option<&Path>) -> Result<Self> {
        let path = MatmartPaths::new(base).state_file()?;
        let state = Self::load_from(&path)?;
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            path,
        })
    }

    fn load_from(path: &Path) -> Result<PersistedState> {
        if !path.exists() {
            return Ok(PersistedState::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| MatmartError::io(format!("failed to read {}: {}", path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(PersistedState::default());
        }
        Ok(toml::from_str(&content)?)
    }

    fn write_to_disk(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MatmartError::io(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        let serialized = toml::to_string_pretty(state)?;
        fs::write(&self.path, serialized)
            .map_err(|e| MatmartError::io(format!("failed to write {}: {}", self.path.display(), e)))
    }

    /// Applies a mutation to the cached state and writes it through.
    async fn update<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut PersistedState),
    {
        let mut state = self.state.lock().await;
        mutate(&mut state);
        self.write_to_disk(&state)
    }
}

#[async_trait::async_trait]
impl StateRepository for TomlStateRepository {
    async fn save_state(&self, state: PersistedState) -> Result<()> {
        let mut cached = self.state.lock().await;
        *cached = state;
        self.write_to_disk(&cached)
    }

    async fn get_state(&self) -> Result<PersistedState> {
        Ok(self.state.lock().await.clone())
    }

    async fn get_auth_token(&self) -> Option<String> {
        self.state.lock().await.auth_token.clone()
    }

    async fn set_auth_token(&self, token: String) -> Result<()> {
        self.update(|state| state.auth_token = Some(token)).await
    }

    async fn clear_auth_token(&self) -> Result<()> {
        self.update(|state| state.auth_token = None).await
    }

    async fn set_recent_searches(&self, searches: Vec<String>) -> Result<()> {
        self.update(|state| state.recent_searches = searches).await
    }

    async fn set_comparison(&self, comparison: Vec<String>) -> Result<()> {
        self.update(|state| state.comparison = comparison).await
    }
}
