//! End-to-end wiring over the on-disk collaborators.

use pkgcfg_application::PackageConfiguration;
use pkgcfg_application::source::{
    ACTIVE_PACKAGE_SOURCE_SECTION, PACKAGE_SOURCES_SECTION, SettingsPackageSourceProvider,
};
use pkgcfg_core::settings::{SETTINGS_FILE_NAME, Settings, WORKSPACE_SETTINGS_FOLDER};
use pkgcfg_core::source::{DEFAULT_SOURCE_NAME, PackageSource, PackageSourceProvider};
use pkgcfg_infrastructure::legacy::{ACTIVE_SOURCE_FILE_NAME, SOURCES_FILE_NAME};
use pkgcfg_infrastructure::{FileSettings, HostWorkspace, PkgcfgPaths};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const LEGACY_LIST: &str = "<ArrayOfPackageSource xmlns=\"http://schemas.datacontract.org/2004/07/NuGet\" xmlns:i=\"http://www.w3.org/2001/XMLSchema-instance\"><PackageSource><IsAggregate>true</IsAggregate><IsEnabled>true</IsEnabled><Name>All</Name><Source>(Aggregate source)</Source></PackageSource><PackageSource><IsAggregate>false</IsAggregate><IsEnabled>true</IsEnabled><Name>corp</Name><Source>https://corp.example/feed</Source></PackageSource></ArrayOfPackageSource>";
const LEGACY_ACTIVE: &str = "<PackageSource xmlns=\"http://schemas.datacontract.org/2004/07/NuGet\" xmlns:i=\"http://www.w3.org/2001/XMLSchema-instance\"><IsAggregate>false</IsAggregate><IsEnabled>true</IsEnabled><Name>corp</Name><Source>https://corp.example/feed</Source></PackageSource>";

fn paths(config_dir: &TempDir) -> PkgcfgPaths {
    PkgcfgPaths::new(Some(config_dir.path().to_path_buf()))
}

#[test]
fn test_fresh_install_seeds_user_file() {
    let config_dir = TempDir::new().unwrap();
    let workspace = Arc::new(HostWorkspace::new());

    let configuration = PackageConfiguration::bootstrap_with_paths(workspace, paths(&config_dir)).unwrap();

    let sources = configuration.sources().load_sources().unwrap();
    assert_eq!(sources, vec![PackageSource::default_source()]);

    let user_file = Arc::new(FileSettings::in_directory(config_dir.path()));
    let persisted = SettingsPackageSourceProvider::new(user_file.clone())
        .load_package_sources()
        .unwrap();
    assert_eq!(persisted, vec![PackageSource::default_source()]);
    assert_eq!(persisted[0].name, DEFAULT_SOURCE_NAME);
    assert!(!user_file.get_values(PACKAGE_SOURCES_SECTION).unwrap().is_empty());
}

#[test]
fn test_legacy_files_are_migrated_into_user_file() {
    let config_dir = TempDir::new().unwrap();
    let legacy_dir = paths(&config_dir).legacy_dir().unwrap();
    fs::create_dir_all(&legacy_dir).unwrap();
    fs::write(legacy_dir.join(SOURCES_FILE_NAME), LEGACY_LIST).unwrap();
    fs::write(legacy_dir.join(ACTIVE_SOURCE_FILE_NAME), LEGACY_ACTIVE).unwrap();

    let configuration =
        PackageConfiguration::bootstrap_with_paths(Arc::new(HostWorkspace::new()), paths(&config_dir))
            .unwrap();

    assert!(!legacy_dir.join(SOURCES_FILE_NAME).exists());
    assert!(!legacy_dir.join(ACTIVE_SOURCE_FILE_NAME).exists());

    let registry = configuration.sources();
    let names: Vec<_> = registry
        .load_sources()
        .unwrap()
        .into_iter()
        .map(|source| source.name)
        .collect();
    assert_eq!(names, vec![DEFAULT_SOURCE_NAME.to_string(), "corp".to_string()]);
    assert_eq!(
        registry.active_package_source().unwrap().map(|source| source.name),
        Some("corp".to_string())
    );

    let user_file = FileSettings::in_directory(config_dir.path());
    assert_eq!(
        user_file.get_value(ACTIVE_PACKAGE_SOURCE_SECTION, "corp").unwrap(),
        Some("https://corp.example/feed".to_string())
    );
}

#[test]
fn test_workspace_file_takes_over_defaults_when_opened() {
    let config_dir = TempDir::new().unwrap();
    let workspace_root = TempDir::new().unwrap();
    let workspace_settings = workspace_root.path().join(WORKSPACE_SETTINGS_FOLDER);
    fs::create_dir_all(&workspace_settings).unwrap();
    fs::write(workspace_settings.join(SETTINGS_FILE_NAME), "").unwrap();

    let workspace = Arc::new(HostWorkspace::new());
    let configuration =
        PackageConfiguration::bootstrap_with_paths(workspace.clone(), paths(&config_dir)).unwrap();
    let settings = configuration.settings();

    workspace.open(workspace_root.path());
    settings.set_value("config", "repositoryPath", "packages").unwrap();
    settings.set_value("solution", "disableSourceControlIntegration", "true").unwrap();

    let workspace_file = FileSettings::in_directory(&workspace_settings);
    assert_eq!(
        workspace_file.get_value("config", "repositoryPath").unwrap(),
        Some("packages".to_string())
    );
    assert_eq!(
        settings.get_path_value("config", "repositoryPath").unwrap(),
        Some(workspace_settings.join("packages"))
    );
    assert_eq!(
        workspace_file
            .get_value("solution", "disableSourceControlIntegration")
            .unwrap(),
        Some("true".to_string())
    );

    workspace.close();
    assert_eq!(settings.get_value("config", "repositoryPath").unwrap(), None);
    assert_eq!(
        configuration.sources().load_sources().unwrap(),
        vec![PackageSource::default_source()]
    );
}
