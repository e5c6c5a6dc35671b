//! TOML file-backed settings store.

use crate::dto::SettingsFileV1;
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use pkgcfg_core::error::Result;
use pkgcfg_core::settings::{SETTINGS_FILE_NAME, SettingValue, Settings, SettingsDocument};
use std::path::{Path, PathBuf};

/// A [`Settings`] store bound to one `pkgcfg.toml` file.
///
/// Every read loads the file; every write is a locked read-modify-write that
/// replaces the file atomically. Nothing is cached between calls, so several
/// instances bound to the same path observe each other's writes.
///
/// A missing file reads as empty and is created on the first write.
pub struct FileSettings {
    file: AtomicTomlFile<SettingsFileV1>,
}

impl FileSettings {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Binds to `<directory>/pkgcfg.toml`.
    pub fn in_directory(directory: &Path) -> Self {
        Self::new(directory.join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn read(&self) -> Result<SettingsDocument> {
        match self.file.load()? {
            Some(dto) => {
                dto.ensure_supported()?;
                Ok(dto.into())
            }
            None => Ok(SettingsDocument::new()),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut SettingsDocument) -> R) -> Result<R> {
        let result = self.file.update(SettingsFileV1::default(), |dto| {
            dto.ensure_supported()?;
            let mut document = SettingsDocument::from(std::mem::take(dto));
            let result = f(&mut document);
            *dto = SettingsFileV1::from(&document);
            Ok::<R, AtomicTomlError>(result)
        })?;
        tracing::debug!("Wrote settings file {}", self.path().display());
        Ok(result)
    }
}

impl Settings for FileSettings {
    fn get_value(&self, section: &str, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.get_value(section, key))
    }

    fn get_path_value(&self, section: &str, key: &str) -> Result<Option<PathBuf>> {
        let Some(value) = self.get_value(section, key)? else {
            return Ok(None);
        };
        let path = PathBuf::from(value);
        if path.is_absolute() {
            return Ok(Some(path));
        }
        Ok(Some(match self.path().parent() {
            Some(parent) => parent.join(path),
            None => path,
        }))
    }

    fn get_values(&self, section: &str) -> Result<Vec<SettingValue>> {
        Ok(self.read()?.get_values(section))
    }

    fn get_nested_values(&self, section: &str, key: &str) -> Result<Vec<SettingValue>> {
        Ok(self.read()?.get_nested_values(section, key))
    }

    fn set_value(&self, section: &str, key: &str, value: &str) -> Result<()> {
        self.write(|document| document.set_value(section, key, value))
    }

    fn set_values(&self, section: &str, values: &[SettingValue]) -> Result<()> {
        self.write(|document| document.set_values(section, values))
    }

    fn set_nested_values(&self, section: &str, key: &str, values: &[SettingValue]) -> Result<()> {
        self.write(|document| document.set_nested_values(section, key, values))
    }

    fn delete_value(&self, section: &str, key: &str) -> Result<bool> {
        if !self.path().exists() {
            return Ok(false);
        }
        self.write(|document| document.delete_value(section, key))
    }

    fn delete_section(&self, section: &str) -> Result<bool> {
        if !self.path().exists() {
            return Ok(false);
        }
        self.write(|document| document.delete_section(section))
    }
}
