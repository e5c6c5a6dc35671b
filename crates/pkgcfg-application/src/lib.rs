//! Application layer for pkgcfg.
//!
//! Composes the core contracts and infrastructure collaborators into the
//! workspace-aware settings resolver and the package source registry.

pub mod configuration;
pub mod logging;
pub mod settings;
pub mod source;

pub use configuration::PackageConfiguration;
pub use settings::LayeredSettings;
pub use source::{PackageSourceRegistry, SettingsPackageSourceProvider};
