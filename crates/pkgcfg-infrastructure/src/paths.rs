//! Path management for pkgcfg settings files.
//!
//! # Directory Structure
//!
//! ```text
//! <config dir>/pkgcfg/             # User config directory (or $PKGCFG_CONFIG_DIR)
//! ├── pkgcfg.toml                  # User-level settings
//! └── legacy/                      # Legacy source store
//!     ├── packageSources.xml
//!     └── activePackageSource.xml
//!
//! <workspace root>/.pkgcfg/
//! └── pkgcfg.toml                  # Workspace-local settings (opt-in)
//! ```

use pkgcfg_core::PkgcfgError;
use std::path::PathBuf;

pub use pkgcfg_core::settings::{SETTINGS_FILE_NAME, WORKSPACE_SETTINGS_FOLDER};

/// Environment variable overriding the user config directory.
pub const CONFIG_DIR_ENV: &str = "PKGCFG_CONFIG_DIR";
/// Application folder under the platform config directory.
pub const APP_DIR_NAME: &str = "pkgcfg";
/// Folder under the config directory holding the legacy source blobs.
pub const LEGACY_DIR_NAME: &str = "legacy";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for PkgcfgError {
    fn from(e: PathError) -> Self {
        PkgcfgError::config(e.to_string())
    }
}

/// Resolves the user-level locations pkgcfg reads and writes.
#[derive(Debug, Clone, Default)]
pub struct PkgcfgPaths {
    base_dir: Option<PathBuf>,
}

impl PkgcfgPaths {
    /// Creates a resolver. `base_dir` replaces `<config dir>/pkgcfg` when given.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Uses `$PKGCFG_CONFIG_DIR` when set and non-empty, the platform default otherwise.
    pub fn from_env() -> Self {
        let base_dir = std::env::var_os(CONFIG_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::new(base_dir)
    }

    /// Returns the pkgcfg configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base_dir) = &self.base_dir {
            return Ok(base_dir.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the user-level settings file.
    pub fn user_settings_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Returns the directory holding the legacy source blobs.
    pub fn legacy_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(LEGACY_DIR_NAME))
    }
}
