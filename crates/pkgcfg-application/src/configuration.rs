//! Composition of the resolver, the source provider and the registry.

use anyhow::{Context, Result};
use pkgcfg_core::legacy::{LegacySourceParser, LegacySourceStore};
use pkgcfg_core::settings::{DefaultSettingsLoader, Settings, SettingsFileProvider};
use pkgcfg_core::workspace::WorkspaceContext;
use pkgcfg_infrastructure::{
    FileLegacySourceStore, PhysicalFileSystemProvider, PkgcfgPaths, UserSettingsLoader,
    XmlLegacySourceParser,
};
use std::sync::Arc;

use crate::settings::LayeredSettings;
use crate::source::{PackageSourceRegistry, SettingsPackageSourceProvider};

/// Package configuration for one host process.
///
/// Holds the workspace-aware settings view and the source registry built
/// over it.
pub struct PackageConfiguration {
    settings: Arc<LayeredSettings>,
    sources: PackageSourceRegistry,
}

impl PackageConfiguration {
    /// Wires explicit collaborators together.
    pub fn new(
        workspace: Arc<dyn WorkspaceContext>,
        files: Arc<dyn SettingsFileProvider>,
        loader: Arc<dyn DefaultSettingsLoader>,
        legacy: &dyn LegacySourceStore,
        parser: &dyn LegacySourceParser,
    ) -> pkgcfg_core::Result<Self> {
        let settings = Arc::new(LayeredSettings::with_loader(workspace, files, loader)?);
        let provider = Arc::new(SettingsPackageSourceProvider::new(settings.clone()));
        let sources = PackageSourceRegistry::new(legacy, parser, settings.clone(), provider)?;
        Ok(Self { settings, sources })
    }

    /// Builds the configuration with the on-disk collaborators.
    ///
    /// User settings and legacy blobs are looked up under the pkgcfg config
    /// directory (`PKGCFG_CONFIG_DIR` or the platform default).
    pub fn bootstrap(workspace: Arc<dyn WorkspaceContext>) -> Result<Self> {
        Self::bootstrap_with_paths(workspace, PkgcfgPaths::from_env())
    }

    /// Same as [`bootstrap`](Self::bootstrap) with an explicit config directory layout.
    pub fn bootstrap_with_paths(
        workspace: Arc<dyn WorkspaceContext>,
        paths: PkgcfgPaths,
    ) -> Result<Self> {
        let legacy_dir = paths
            .legacy_dir()
            .context("Failed to resolve legacy source directory")?;
        let files: Arc<dyn SettingsFileProvider> = Arc::new(PhysicalFileSystemProvider);
        let loader = Arc::new(UserSettingsLoader::new(paths, files.clone()));

        Self::new(
            workspace,
            files,
            loader,
            &FileLegacySourceStore::new(legacy_dir),
            &XmlLegacySourceParser,
        )
        .context("Failed to initialize package configuration")
    }

    pub fn settings(&self) -> Arc<dyn Settings> {
        self.settings.clone()
    }

    pub fn layered_settings(&self) -> &LayeredSettings {
        &self.settings
    }

    pub fn sources(&self) -> &PackageSourceRegistry {
        &self.sources
    }
}
