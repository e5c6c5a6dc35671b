use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::error::{PkgcfgError, Result};

/// Display name of the source seeded into an empty list.
pub const DEFAULT_SOURCE_NAME: &str = "NuGet official package source";
/// Location of the source seeded into an empty list.
pub const DEFAULT_SOURCE_LOCATION: &str = "https://go.microsoft.com/fwlink/?LinkID=206669";
/// Display name of the synthetic "search all sources" entry.
pub const AGGREGATE_SOURCE_NAME: &str = "All";
/// Location of the synthetic "search all sources" entry.
pub const AGGREGATE_SOURCE_LOCATION: &str = "(Aggregate source)";

/// A named remote package location.
///
/// Identity is the `location` string alone: two sources with the same location
/// are equal regardless of name or flags. Comparison is case-sensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSource {
    /// Display identifier
    pub name: String,
    /// Source address, the identity key
    pub location: String,
    /// Whether the source takes part in package operations
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    /// Marks the synthetic entry that searches across all sources
    #[serde(default)]
    pub is_aggregate: bool,
}

fn default_enabled() -> bool {
    true
}

impl PackageSource {
    /// Creates an enabled, non-aggregate source.
    pub fn new(location: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            is_enabled: true,
            is_aggregate: false,
        }
    }

    /// The well-known source injected when nothing else is configured.
    pub fn default_source() -> Self {
        Self::new(DEFAULT_SOURCE_LOCATION, DEFAULT_SOURCE_NAME)
    }

    /// The canonical synthetic aggregate entry.
    pub fn aggregate() -> Self {
        Self::new(AGGREGATE_SOURCE_LOCATION, AGGREGATE_SOURCE_NAME).with_aggregate(true)
    }

    pub fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    pub fn with_aggregate(mut self, is_aggregate: bool) -> Self {
        self.is_aggregate = is_aggregate;
        self
    }

    /// Whether this entry is the well-known default source, by name or by location.
    pub fn is_default_source(&self) -> bool {
        self.location == DEFAULT_SOURCE_LOCATION || self.name == DEFAULT_SOURCE_NAME
    }

    /// Checks that the source carries an identity and a display name.
    ///
    /// `param` names the caller's argument in the resulting error.
    pub fn validate(&self, param: &'static str) -> Result<()> {
        if self.location.trim().is_empty() {
            return Err(PkgcfgError::invalid_argument(
                param,
                "Package source location must not be empty.",
            ));
        }
        if self.name.trim().is_empty() {
            return Err(PkgcfgError::invalid_argument(
                param,
                "Package source name must not be empty.",
            ));
        }
        Ok(())
    }
}

impl PartialEq for PackageSource {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for PackageSource {}

impl Hash for PackageSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

/// Keeps the first aggregate-marked entry and drops any later ones.
///
/// Returns the collapsed list and the number of dropped entries. Order of the
/// remaining entries is preserved.
pub fn collapse_aggregates(sources: Vec<PackageSource>) -> (Vec<PackageSource>, usize) {
    let mut seen_aggregate = false;
    let mut dropped = 0;
    let collapsed = sources
        .into_iter()
        .filter(|source| {
            if !source.is_aggregate {
                return true;
            }
            if seen_aggregate {
                dropped += 1;
                return false;
            }
            seen_aggregate = true;
            true
        })
        .collect();
    (collapsed, dropped)
}
