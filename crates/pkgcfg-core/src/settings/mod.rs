//! Key/value settings contract.
//!
//! A settings store holds named sections. Each section carries ordered
//! key/value pairs and ordered nested groups (key → ordered pairs). Section
//! names compare ASCII case-insensitively; keys compare exactly.

pub mod document;
pub mod null;
pub mod provider;

pub use document::{SettingsDocument, SettingsSection, section_name_eq};
pub use null::NullSettings;
pub use provider::{DefaultSettingsLoader, SettingsFileProvider};

use std::path::PathBuf;

use crate::error::Result;

/// Section whose reads and writes resolve against the workspace-local store.
pub const SOLUTION_SECTION: &str = "solution";
/// Folder under a workspace root holding its settings file.
pub const WORKSPACE_SETTINGS_FOLDER: &str = ".pkgcfg";
/// File name of every settings file, workspace-local or user-level.
pub const SETTINGS_FILE_NAME: &str = "pkgcfg.toml";

/// A single key/value pair inside a section or nested group.
pub type SettingValue = (String, String);

/// Key/value settings store.
///
/// Reads of missing sections or keys return `None` or an empty vector; only
/// storage failures are errors.
pub trait Settings: Send + Sync {
    fn get_value(&self, section: &str, key: &str) -> Result<Option<String>>;

    /// Reads a value that holds a path.
    ///
    /// File-backed stores resolve relative paths against the directory that
    /// contains the settings file. The default keeps the value as written.
    fn get_path_value(&self, section: &str, key: &str) -> Result<Option<PathBuf>> {
        Ok(self.get_value(section, key)?.map(PathBuf::from))
    }

    fn get_values(&self, section: &str) -> Result<Vec<SettingValue>>;

    fn get_nested_values(&self, section: &str, key: &str) -> Result<Vec<SettingValue>>;

    /// Inserts or overwrites one key, creating the section if needed.
    fn set_value(&self, section: &str, key: &str, value: &str) -> Result<()>;

    /// Inserts or overwrites each key in order, creating the section if needed.
    fn set_values(&self, section: &str, values: &[SettingValue]) -> Result<()>;

    /// Replaces the nested group stored under `key`.
    fn set_nested_values(&self, section: &str, key: &str, values: &[SettingValue]) -> Result<()>;

    /// Removes one key. Returns whether it existed.
    fn delete_value(&self, section: &str, key: &str) -> Result<bool>;

    /// Removes a whole section. Returns whether it existed.
    fn delete_section(&self, section: &str) -> Result<bool>;
}
