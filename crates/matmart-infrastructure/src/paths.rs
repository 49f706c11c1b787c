//! Unified path management for matmart client files.
//!
//! All persisted client state lives under a single `matmart` directory in
//! the platform config location:
//!
//! ```text
//! ~/.config/matmart/           # Linux (XDG); equivalent elsewhere
//! └── state.toml               # persisted client state (allow-list)
//! ```

use std::path::{Path, PathBuf};

use matmart_core::error::{MatmartError, Result};

/// File name of the persisted client state.
const STATE_FILE: &str = "state.toml";

/// Path resolution for matmart client storage.
///
/// A base directory can be injected (tests point it at a temp dir);
/// otherwise the platform config directory is used.
pub struct MatmartPaths {
    base: Option<PathBuf>,
}

impl MatmartPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the matmart config directory.
    ///
    /// # Errors
    ///
    /// Returns `MatmartError::Config` when no home/config directory can
    /// be determined for the platform.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(ref base) = self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("matmart"))
            .ok_or_else(|| MatmartError::config("cannot determine platform config directory"))
    }

    /// Returns the path of the persisted state file.
    pub fn state_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(STATE_FILE))
    }
}
