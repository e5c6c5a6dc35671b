//! Traits for locating settings files on disk.

use std::path::Path;
use std::sync::Arc;

use super::Settings;
use crate::error::Result;

/// Opens the settings file that lives in a directory.
pub trait SettingsFileProvider: Send + Sync {
    /// Returns a store bound to `<directory>/pkgcfg.toml`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(_))`: The file exists and the store is bound to it
    /// - `Ok(None)`: The file does not exist
    /// - `Err(_)`: The directory could not be inspected
    fn open_settings(&self, directory: &Path) -> Result<Option<Arc<dyn Settings>>>;
}

/// Builds the default (non-workspace-section) store.
///
/// Called once at startup and again on every workspace transition; each call
/// must build a fresh instance.
pub trait DefaultSettingsLoader: Send + Sync {
    /// # Arguments
    ///
    /// * `workspace_settings_dir` - `<root>/.pkgcfg` of the open workspace, or
    ///   `None` when no workspace is open
    fn load_default(&self, workspace_settings_dir: Option<&Path>) -> Result<Arc<dyn Settings>>;
}
