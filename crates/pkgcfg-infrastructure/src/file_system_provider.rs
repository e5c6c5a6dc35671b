//! Locating settings files on the physical file system.

use crate::file_settings::FileSettings;
use crate::paths::PkgcfgPaths;
use pkgcfg_core::error::Result;
use pkgcfg_core::settings::{
    DefaultSettingsLoader, SETTINGS_FILE_NAME, Settings, SettingsFileProvider,
};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

/// Opens `pkgcfg.toml` files directly from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalFileSystemProvider;

impl SettingsFileProvider for PhysicalFileSystemProvider {
    fn open_settings(&self, directory: &Path) -> Result<Option<Arc<dyn Settings>>> {
        let path = directory.join(SETTINGS_FILE_NAME);
        match std::fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => {
                Ok(Some(Arc::new(FileSettings::new(path)) as Arc<dyn Settings>))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Loads the default store: the workspace file when one exists, the
/// user-level file otherwise.
pub struct UserSettingsLoader {
    paths: PkgcfgPaths,
    files: Arc<dyn SettingsFileProvider>,
}

impl UserSettingsLoader {
    pub fn new(paths: PkgcfgPaths, files: Arc<dyn SettingsFileProvider>) -> Self {
        Self { paths, files }
    }
}

impl Default for UserSettingsLoader {
    fn default() -> Self {
        Self::new(PkgcfgPaths::from_env(), Arc::new(PhysicalFileSystemProvider))
    }
}

impl DefaultSettingsLoader for UserSettingsLoader {
    fn load_default(&self, workspace_settings_dir: Option<&Path>) -> Result<Arc<dyn Settings>> {
        if let Some(dir) = workspace_settings_dir {
            if let Some(settings) = self.files.open_settings(dir)? {
                tracing::debug!("Default settings bound to workspace {}", dir.display());
                return Ok(settings);
            }
        }

        let path = self.paths.user_settings_file()?;
        tracing::debug!("Default settings bound to user file {}", path.display());
        Ok(Arc::new(FileSettings::new(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_settings_requires_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let provider = PhysicalFileSystemProvider;

        assert!(provider.open_settings(temp_dir.path()).unwrap().is_none());
        assert!(provider
            .open_settings(&temp_dir.path().join("missing"))
            .unwrap()
            .is_none());

        fs::write(temp_dir.path().join(SETTINGS_FILE_NAME), "").unwrap();
        assert!(provider.open_settings(temp_dir.path()).unwrap().is_some());
    }

    #[test]
    fn test_loader_prefers_workspace_file() {
        let user_dir = TempDir::new().unwrap();
        let workspace_dir = TempDir::new().unwrap();
        FileSettings::in_directory(workspace_dir.path())
            .set_value("config", "origin", "workspace")
            .unwrap();
        FileSettings::in_directory(user_dir.path())
            .set_value("config", "origin", "user")
            .unwrap();

        let loader = UserSettingsLoader::new(
            PkgcfgPaths::new(Some(user_dir.path().to_path_buf())),
            Arc::new(PhysicalFileSystemProvider),
        );

        let settings = loader.load_default(Some(workspace_dir.path())).unwrap();
        assert_eq!(
            settings.get_value("config", "origin").unwrap(),
            Some("workspace".to_string())
        );

        let settings = loader.load_default(None).unwrap();
        assert_eq!(
            settings.get_value("config", "origin").unwrap(),
            Some("user".to_string())
        );
    }

    #[test]
    fn test_loader_falls_back_when_workspace_file_missing() {
        let user_dir = TempDir::new().unwrap();
        let workspace_dir = TempDir::new().unwrap();
        let loader = UserSettingsLoader::new(
            PkgcfgPaths::new(Some(user_dir.path().to_path_buf())),
            Arc::new(PhysicalFileSystemProvider),
        );

        let settings = loader.load_default(Some(workspace_dir.path())).unwrap();
        settings.set_value("config", "k", "v").unwrap();

        assert!(user_dir.path().join(SETTINGS_FILE_NAME).exists());
        assert!(!workspace_dir.path().join(SETTINGS_FILE_NAME).exists());
    }
}
