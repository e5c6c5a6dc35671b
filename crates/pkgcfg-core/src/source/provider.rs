//! Package source persistence trait.

use super::model::PackageSource;
use crate::error::Result;

/// Reads and writes the ordered source list in some backing store.
///
/// Implementations store the list verbatim; policy such as default seeding or
/// aggregate reconciliation belongs to the registry built on top.
pub trait PackageSourceProvider: Send + Sync {
    /// Loads the persisted list in its stored order.
    ///
    /// Returns an empty vector when nothing has been persisted.
    fn load_package_sources(&self) -> Result<Vec<PackageSource>>;

    /// Replaces the persisted list with `sources`, preserving order.
    fn save_package_sources(&self, sources: &[PackageSource]) -> Result<()>;
}
