//! Concrete collaborators for pkgcfg: TOML-backed and in-memory settings
//! stores, settings file discovery, the legacy source store and its XML
//! parser, and an in-process workspace context.

pub mod dto;
pub mod file_settings;
pub mod file_system_provider;
pub mod host_workspace;
pub mod legacy;
pub mod memory_settings;
pub mod paths;
pub mod storage;

pub use crate::file_settings::FileSettings;
pub use crate::file_system_provider::{PhysicalFileSystemProvider, UserSettingsLoader};
pub use crate::host_workspace::HostWorkspace;
pub use crate::legacy::{FileLegacySourceStore, MemoryLegacySourceStore, XmlLegacySourceParser};
pub use crate::memory_settings::MemorySettings;
pub use crate::paths::PkgcfgPaths;
