//! In-memory settings store.

use pkgcfg_core::error::{PkgcfgError, Result};
use pkgcfg_core::settings::{SettingValue, Settings, SettingsDocument};
use std::sync::{Mutex, MutexGuard};

/// A [`Settings`] store kept entirely in memory.
///
/// Useful for hosts that persist settings elsewhere and for tests.
#[derive(Debug, Default)]
pub struct MemorySettings {
    document: Mutex<SettingsDocument>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: SettingsDocument) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }

    /// Returns a copy of the current contents.
    pub fn snapshot(&self) -> Result<SettingsDocument> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, SettingsDocument>> {
        self.document
            .lock()
            .map_err(|e| PkgcfgError::internal(format!("Settings lock poisoned: {}", e)))
    }
}

impl Settings for MemorySettings {
    fn get_value(&self, section: &str, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get_value(section, key))
    }

    fn get_values(&self, section: &str) -> Result<Vec<SettingValue>> {
        Ok(self.lock()?.get_values(section))
    }

    fn get_nested_values(&self, section: &str, key: &str) -> Result<Vec<SettingValue>> {
        Ok(self.lock()?.get_nested_values(section, key))
    }

    fn set_value(&self, section: &str, key: &str, value: &str) -> Result<()> {
        self.lock()?.set_value(section, key, value);
        Ok(())
    }

    fn set_values(&self, section: &str, values: &[SettingValue]) -> Result<()> {
        self.lock()?.set_values(section, values);
        Ok(())
    }

    fn set_nested_values(&self, section: &str, key: &str, values: &[SettingValue]) -> Result<()> {
        self.lock()?.set_nested_values(section, key, values);
        Ok(())
    }

    fn delete_value(&self, section: &str, key: &str) -> Result<bool> {
        Ok(self.lock()?.delete_value(section, key))
    }

    fn delete_section(&self, section: &str) -> Result<bool> {
        Ok(self.lock()?.delete_section(section))
    }
}
