//! Package source management.

mod registry;
mod settings_provider;

pub use registry::PackageSourceRegistry;
pub use settings_provider::{
    ACTIVE_PACKAGE_SOURCE_SECTION, PACKAGE_SOURCES_SECTION, SettingsPackageSourceProvider,
};
