//! Legacy source storage.
//!
//! Older releases kept the source list and the active source as two opaque
//! serialized blobs. The registry reads them once, migrates them into the
//! settings store and clears them.

use crate::error::Result;
use crate::source::PackageSource;

/// Access to the two legacy blobs.
pub trait LegacySourceStore: Send + Sync {
    /// The serialized source list, if one is still stored.
    fn serialized_sources(&self) -> Result<Option<String>>;

    fn clear_serialized_sources(&self) -> Result<()>;

    /// The serialized active source, if one is still stored.
    fn serialized_active_source(&self) -> Result<Option<String>>;

    fn clear_serialized_active_source(&self) -> Result<()>;
}

/// Decodes the legacy wire format.
///
/// Kept separate from [`LegacySourceStore`] so the migration logic never
/// depends on the payload format.
pub trait LegacySourceParser: Send + Sync {
    /// Parses an ordered collection of source records.
    fn parse_source_list(&self, payload: &str) -> Result<Vec<PackageSource>>;

    /// Parses a single source record.
    fn parse_active_source(&self, payload: &str) -> Result<PackageSource>;
}
