use pkgcfg_core::error::{PkgcfgError, Result};
use pkgcfg_core::legacy::LegacySourceStore;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Blobs {
    sources: Option<String>,
    active_source: Option<String>,
}

/// Legacy blobs held in memory.
///
/// Hosts that read the legacy store through their own APIs hand the payloads
/// over with this type.
#[derive(Debug, Default)]
pub struct MemoryLegacySourceStore {
    blobs: Mutex<Blobs>,
}

impl MemoryLegacySourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(self, payload: impl Into<String>) -> Self {
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.sources = Some(payload.into());
        }
        self
    }

    pub fn with_active_source(self, payload: impl Into<String>) -> Self {
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.active_source = Some(payload.into());
        }
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Blobs>> {
        self.blobs
            .lock()
            .map_err(|e| PkgcfgError::internal(format!("Legacy store lock poisoned: {}", e)))
    }
}

impl LegacySourceStore for MemoryLegacySourceStore {
    fn serialized_sources(&self) -> Result<Option<String>> {
        Ok(self.lock()?.sources.clone())
    }

    fn clear_serialized_sources(&self) -> Result<()> {
        self.lock()?.sources = None;
        Ok(())
    }

    fn serialized_active_source(&self) -> Result<Option<String>> {
        Ok(self.lock()?.active_source.clone())
    }

    fn clear_serialized_active_source(&self) -> Result<()> {
        self.lock()?.active_source = None;
        Ok(())
    }
}
