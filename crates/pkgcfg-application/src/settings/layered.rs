//! Workspace-aware settings resolver.
//!
//! `LayeredSettings` presents one [`Settings`] view over two stores:
//!
//! ```text
//! section == "solution" (any case)  →  <workspace root>/.pkgcfg/pkgcfg.toml
//!                                      (NullSettings when absent)
//! any other section                 →  current default store
//! ```
//!
//! The default store is rebuilt by the [`DefaultSettingsLoader`] on every
//! workspace open/close and swapped into place as a whole.

use pkgcfg_core::error::Result;
use pkgcfg_core::settings::{
    DefaultSettingsLoader, NullSettings, SOLUTION_SECTION, SettingValue, Settings,
    SettingsFileProvider, section_name_eq,
};
use pkgcfg_core::workspace::{SubscriptionId, WorkspaceContext};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

type DefaultCell = Arc<RwLock<Arc<dyn Settings>>>;

/// Merged settings view over the workspace-local and default stores.
///
/// Construction subscribes to workspace notifications; dropping the resolver
/// detaches the subscription.
pub struct LayeredSettings {
    workspace: Arc<dyn WorkspaceContext>,
    files: Arc<dyn SettingsFileProvider>,
    default_settings: DefaultCell,
    subscription: SubscriptionId,
}

impl LayeredSettings {
    /// Creates a resolver starting from an already loaded default store.
    ///
    /// # Arguments
    ///
    /// * `workspace` - Host workspace context, observed for open/close
    /// * `default_settings` - Store used for non-workspace sections until the
    ///   first transition
    /// * `files` - Opens the workspace-local settings file
    /// * `loader` - Rebuilds the default store after each transition
    pub fn new(
        workspace: Arc<dyn WorkspaceContext>,
        default_settings: Arc<dyn Settings>,
        files: Arc<dyn SettingsFileProvider>,
        loader: Arc<dyn DefaultSettingsLoader>,
    ) -> Self {
        let default_settings: DefaultCell = Arc::new(RwLock::new(default_settings));

        let cell = Arc::clone(&default_settings);
        let observed = Arc::downgrade(&workspace);
        let subscription = workspace.subscribe(Box::new(move |event| {
            let Some(workspace) = observed.upgrade() else {
                return;
            };
            let settings_dir = workspace.settings_dir();
            let next = match loader.load_default(settings_dir.as_deref()) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::error!(
                        "Failed to reload default settings after workspace {:?}: {}",
                        event,
                        e
                    );
                    NullSettings::shared()
                }
            };
            replace_default(&cell, next);
            tracing::debug!("Default settings rebuilt after workspace {:?}", event);
        }));

        Self {
            workspace,
            files,
            default_settings,
            subscription,
        }
    }

    /// Creates a resolver whose initial default store comes from `loader`.
    pub fn with_loader(
        workspace: Arc<dyn WorkspaceContext>,
        files: Arc<dyn SettingsFileProvider>,
        loader: Arc<dyn DefaultSettingsLoader>,
    ) -> Result<Self> {
        let settings_dir = workspace.settings_dir();
        let default_settings = loader.load_default(settings_dir.as_deref())?;
        Ok(Self::new(workspace, default_settings, files, loader))
    }

    /// The default store currently in use.
    pub fn current_default(&self) -> Arc<dyn Settings> {
        match self.default_settings.read() {
            Ok(settings) => Arc::clone(&settings),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Directory the workspace-local store would be read from, if any.
    pub fn workspace_settings_dir(&self) -> Option<PathBuf> {
        self.workspace.settings_dir()
    }

    fn solution_settings(&self) -> Result<Arc<dyn Settings>> {
        let Some(dir) = self.workspace.settings_dir() else {
            return Ok(NullSettings::shared());
        };
        Ok(self
            .files
            .open_settings(&dir)?
            .unwrap_or_else(NullSettings::shared))
    }

    fn route(&self, section: &str) -> Result<Arc<dyn Settings>> {
        if section_name_eq(section, SOLUTION_SECTION) {
            self.solution_settings()
        } else {
            Ok(self.current_default())
        }
    }
}

fn replace_default(cell: &RwLock<Arc<dyn Settings>>, next: Arc<dyn Settings>) {
    match cell.write() {
        Ok(mut current) => *current = next,
        Err(poisoned) => *poisoned.into_inner() = next,
    }
}

impl Drop for LayeredSettings {
    fn drop(&mut self) {
        self.workspace.unsubscribe(self.subscription);
    }
}

impl Settings for LayeredSettings {
    fn get_value(&self, section: &str, key: &str) -> Result<Option<String>> {
        self.route(section)?.get_value(section, key)
    }

    fn get_path_value(&self, section: &str, key: &str) -> Result<Option<PathBuf>> {
        self.route(section)?.get_path_value(section, key)
    }

    fn get_values(&self, section: &str) -> Result<Vec<SettingValue>> {
        self.route(section)?.get_values(section)
    }

    fn get_nested_values(&self, section: &str, key: &str) -> Result<Vec<SettingValue>> {
        self.route(section)?.get_nested_values(section, key)
    }

    fn set_value(&self, section: &str, key: &str, value: &str) -> Result<()> {
        self.route(section)?.set_value(section, key, value)
    }

    fn set_values(&self, section: &str, values: &[SettingValue]) -> Result<()> {
        self.route(section)?.set_values(section, values)
    }

    fn set_nested_values(&self, section: &str, key: &str, values: &[SettingValue]) -> Result<()> {
        self.route(section)?.set_nested_values(section, key, values)
    }

    fn delete_value(&self, section: &str, key: &str) -> Result<bool> {
        self.route(section)?.delete_value(section, key)
    }

    fn delete_section(&self, section: &str) -> Result<bool> {
        self.route(section)?.delete_section(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgcfg_core::PkgcfgError;
    use pkgcfg_core::settings::WORKSPACE_SETTINGS_FOLDER;
    use pkgcfg_infrastructure::{HostWorkspace, MemorySettings};
    use std::path::Path;
    use std::sync::Mutex;

    /// Hands out a fresh in-memory store per call and records the directories asked for.
    #[derive(Default)]
    struct RecordingLoader {
        calls: Mutex<Vec<Option<PathBuf>>>,
        fail: bool,
    }

    impl DefaultSettingsLoader for RecordingLoader {
        fn load_default(&self, dir: Option<&Path>) -> Result<Arc<dyn Settings>> {
            self.calls.lock().unwrap().push(dir.map(Path::to_path_buf));
            if self.fail {
                return Err(PkgcfgError::io("disk gone"));
            }
            Ok(Arc::new(MemorySettings::new()))
        }
    }

    /// Serves one shared store for a single known directory.
    struct FixedFiles {
        dir: PathBuf,
        settings: Arc<MemorySettings>,
    }

    impl SettingsFileProvider for FixedFiles {
        fn open_settings(&self, directory: &Path) -> Result<Option<Arc<dyn Settings>>> {
            if directory == self.dir {
                Ok(Some(self.settings.clone() as Arc<dyn Settings>))
            } else {
                Ok(None)
            }
        }
    }

    fn fixture(
        loader: Arc<RecordingLoader>,
    ) -> (Arc<HostWorkspace>, Arc<MemorySettings>, LayeredSettings) {
        let workspace = Arc::new(HostWorkspace::new());
        let solution = Arc::new(MemorySettings::new());
        let files = Arc::new(FixedFiles {
            dir: PathBuf::from("/repo").join(WORKSPACE_SETTINGS_FOLDER),
            settings: solution.clone(),
        });
        let layered = LayeredSettings::new(
            workspace.clone(),
            Arc::new(MemorySettings::new()),
            files,
            loader,
        );
        (workspace, solution, layered)
    }

    #[test]
    fn test_solution_section_without_workspace_is_null() {
        let (_workspace, solution, layered) = fixture(Arc::default());

        layered.set_value("solution", "disableSourceControlIntegration", "true").unwrap();

        assert_eq!(layered.get_value("solution", "disableSourceControlIntegration").unwrap(), None);
        assert!(solution.snapshot().unwrap().is_empty());
        assert!(layered.current_default().get_values("solution").unwrap().is_empty());
    }

    #[test]
    fn test_solution_section_routes_to_workspace_store() {
        let (workspace, solution, layered) = fixture(Arc::default());
        workspace.open("/repo");

        layered.set_value("SOLUTION", "key", "value").unwrap();

        assert_eq!(solution.get_value("solution", "key").unwrap(), Some("value".to_string()));
        assert_eq!(layered.get_value("Solution", "key").unwrap(), Some("value".to_string()));
        assert_eq!(layered.current_default().get_value("solution", "key").unwrap(), None);
    }

    #[test]
    fn test_other_sections_route_to_default_store() {
        let (workspace, solution, layered) = fixture(Arc::default());
        workspace.open("/repo");

        layered.set_value("config", "key", "value").unwrap();

        assert_eq!(
            layered.current_default().get_value("config", "key").unwrap(),
            Some("value".to_string())
        );
        assert!(solution.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_transitions_rebuild_default_store() {
        let loader = Arc::new(RecordingLoader::default());
        let (workspace, _solution, layered) = fixture(loader.clone());
        layered.set_value("config", "key", "before").unwrap();
        let before = layered.current_default();

        workspace.open("/repo");
        let after_open = layered.current_default();
        assert!(!Arc::ptr_eq(&before, &after_open));
        assert_eq!(layered.get_value("config", "key").unwrap(), None);
        assert_eq!(before.get_value("config", "key").unwrap(), Some("before".to_string()));

        workspace.close();
        assert!(!Arc::ptr_eq(&after_open, &layered.current_default()));

        assert_eq!(
            *loader.calls.lock().unwrap(),
            vec![Some(PathBuf::from("/repo").join(WORKSPACE_SETTINGS_FOLDER)), None]
        );
    }

    #[test]
    fn test_failed_rebuild_falls_back_to_null_store() {
        let loader = Arc::new(RecordingLoader {
            fail: true,
            ..Default::default()
        });
        let (workspace, _solution, layered) = fixture(loader);

        workspace.open("/repo");
        layered.set_value("config", "key", "value").unwrap();

        assert_eq!(layered.get_value("config", "key").unwrap(), None);
    }

    #[test]
    fn test_drop_detaches_subscription() {
        let (workspace, _solution, layered) = fixture(Arc::default());
        assert_eq!(workspace.subscriber_count(), 1);

        drop(layered);

        assert_eq!(workspace.subscriber_count(), 0);
        workspace.open("/repo");
    }

    #[test]
    fn test_with_loader_uses_open_workspace() {
        let workspace = Arc::new(HostWorkspace::new());
        workspace.open("/repo");
        let loader = Arc::new(RecordingLoader::default());

        let _layered = LayeredSettings::with_loader(
            workspace,
            Arc::new(pkgcfg_infrastructure::PhysicalFileSystemProvider),
            loader.clone(),
        )
        .unwrap();

        assert_eq!(
            *loader.calls.lock().unwrap(),
            vec![Some(PathBuf::from("/repo").join(WORKSPACE_SETTINGS_FOLDER))]
        );
    }
}
