//! Package source registry.
//!
//! Owns the ordered source list and the active-source designation on top of a
//! [`PackageSourceProvider`] and a [`Settings`] store. Construction performs a
//! one-time migration out of the legacy blobs:
//!
//! ```text
//! legacy list blob? ──yes──► parse → collapse aggregates → save → clear blob
//! legacy active blob? ─yes─► parse → known? write active  →        clear blob
//! neither, stored list empty ─────────────────────────────► seed default source
//! ```

use pkgcfg_core::error::{ACTIVE_SOURCE_NOT_AVAILABLE, PkgcfgError, Result};
use pkgcfg_core::legacy::{LegacySourceParser, LegacySourceStore};
use pkgcfg_core::settings::Settings;
use pkgcfg_core::source::{
    DEFAULT_SOURCE_LOCATION, PackageSource, PackageSourceProvider, collapse_aggregates,
};
use std::sync::Arc;

use super::ACTIVE_PACKAGE_SOURCE_SECTION;

/// Authoritative source list and active selection.
pub struct PackageSourceRegistry {
    settings: Arc<dyn Settings>,
    provider: Arc<dyn PackageSourceProvider>,
}

impl PackageSourceRegistry {
    /// Creates the registry, migrating legacy data or seeding the default source.
    ///
    /// # Arguments
    ///
    /// * `legacy` - Legacy blob storage, cleared after a successful migration
    /// * `parser` - Decoder for the legacy payloads
    /// * `settings` - Store holding the active-source designation
    /// * `provider` - Persistence for the source list
    ///
    /// # Errors
    ///
    /// Store failures propagate unchanged. A legacy blob that cannot be parsed
    /// yields a serialization error and is left in place.
    pub fn new(
        legacy: &dyn LegacySourceStore,
        parser: &dyn LegacySourceParser,
        settings: Arc<dyn Settings>,
        provider: Arc<dyn PackageSourceProvider>,
    ) -> Result<Self> {
        let registry = Self { settings, provider };

        let migrated_sources = registry.migrate_sources(legacy, parser)?;
        let migrated_active = registry.migrate_active_source(legacy, parser)?;

        let stored = registry.provider.load_package_sources()?;
        if !migrated_sources && !migrated_active && stored.is_empty() {
            registry
                .provider
                .save_package_sources(&[PackageSource::default_source()])?;
            tracing::info!("Seeded empty source list with the default package source");
        } else {
            let (collapsed, dropped) = collapse_aggregates(stored);
            if dropped > 0 {
                tracing::warn!("Dropped {} duplicate aggregate source(s) from the stored list", dropped);
                registry.provider.save_package_sources(&collapsed)?;
            }
        }

        Ok(registry)
    }

    fn migrate_sources(
        &self,
        legacy: &dyn LegacySourceStore,
        parser: &dyn LegacySourceParser,
    ) -> Result<bool> {
        let Some(payload) = non_blank(legacy.serialized_sources()?) else {
            return Ok(false);
        };

        let parsed = parser.parse_source_list(&payload)?;
        let (sources, dropped) = collapse_aggregates(parsed);
        if dropped > 0 {
            tracing::warn!("Dropped {} duplicate aggregate source(s) from legacy data", dropped);
        }

        self.provider.save_package_sources(&sources)?;
        legacy.clear_serialized_sources()?;
        tracing::info!("Migrated {} package source(s) from legacy storage", sources.len());
        Ok(true)
    }

    fn migrate_active_source(
        &self,
        legacy: &dyn LegacySourceStore,
        parser: &dyn LegacySourceParser,
    ) -> Result<bool> {
        let Some(payload) = non_blank(legacy.serialized_active_source()?) else {
            return Ok(false);
        };

        let candidate = parser.parse_active_source(&payload)?;
        match self.find_known(&candidate)? {
            Some(known) => {
                self.write_active(&known)?;
                tracing::info!("Migrated active package source '{}'", known.name);
            }
            None => {
                tracing::info!(
                    "Legacy active package source '{}' is not configured; leaving it unset",
                    candidate.location
                );
            }
        }

        legacy.clear_serialized_active_source()?;
        Ok(true)
    }

    /// Sources to show and operate on, re-read on every call.
    ///
    /// The aggregate entry is excluded, an entry named like the default source
    /// points at the default location, and the default source is prepended
    /// when the stored list lacks it.
    pub fn load_sources(&self) -> Result<Vec<PackageSource>> {
        Ok(display_sources(&self.stored_sources()?))
    }

    /// The persisted list with duplicate aggregates collapsed.
    pub fn stored_sources(&self) -> Result<Vec<PackageSource>> {
        let (sources, _) = collapse_aggregates(self.provider.load_package_sources()?);
        Ok(sources)
    }

    /// The aggregate entry kept in the stored list, if any.
    pub fn aggregate_source(&self) -> Result<Option<PackageSource>> {
        Ok(self
            .stored_sources()?
            .into_iter()
            .find(|source| source.is_aggregate))
    }

    /// Appends `source` and persists the list. Duplicates are not filtered.
    pub fn add_package_source(&self, source: &PackageSource) -> Result<()> {
        source.validate("source")?;

        let mut sources = self.stored_sources()?;
        sources.push(source.clone());
        self.provider.save_package_sources(&sources)?;
        tracing::debug!("Added package source '{}'", source.name);
        Ok(())
    }

    /// Removes `source` as it appears in [`load_sources`](Self::load_sources).
    ///
    /// Every stored entry that shows up under the same identity is dropped,
    /// including a default source stored under an old location. Returns
    /// `false` without touching the store when the registry does not know the
    /// source. The active designation is cleared when it pointed at it.
    ///
    /// The default source stays pinned: it is listed again on the next load
    /// even after its stored entries are gone.
    pub fn remove_package_source(&self, source: &PackageSource) -> Result<bool> {
        source.validate("source")?;

        let Some(known) = self.find_known(source)? else {
            return Ok(false);
        };

        let mut sources = self.stored_sources()?;
        let before = sources.len();
        sources.retain(|existing| displayed_location(existing) != known.location);
        if sources.len() != before {
            self.provider.save_package_sources(&sources)?;
        }

        if self.recorded_active_location()?.as_deref() == Some(known.location.as_str()) {
            self.clear_active_package_source()?;
        }
        tracing::debug!("Removed package source '{}'", known.location);
        Ok(true)
    }

    /// Replaces the stored list wholesale.
    ///
    /// Duplicate aggregates are collapsed, and the active designation is
    /// cleared if it no longer names a known source.
    pub fn save_package_sources(&self, sources: &[PackageSource]) -> Result<()> {
        for source in sources {
            source.validate("sources")?;
        }

        let (sources, dropped) = collapse_aggregates(sources.to_vec());
        if dropped > 0 {
            tracing::warn!("Dropped {} duplicate aggregate source(s) on save", dropped);
        }
        self.provider.save_package_sources(&sources)?;

        if self.recorded_active_location()?.is_some() && self.active_package_source()?.is_none() {
            self.clear_active_package_source()?;
        }
        Ok(())
    }

    /// The active source, or `None` when unset or no longer known.
    pub fn active_package_source(&self) -> Result<Option<PackageSource>> {
        let Some(location) = self.recorded_active_location()? else {
            return Ok(None);
        };
        Ok(self
            .known_sources()?
            .into_iter()
            .find(|source| source.location == location))
    }

    /// Designates `value` as the active source.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on `value` when the source is not one the registry knows.
    pub fn set_active_package_source(&self, value: &PackageSource) -> Result<()> {
        value.validate("value")?;

        let Some(known) = self.find_known(value)? else {
            return Err(PkgcfgError::invalid_argument(
                "value",
                ACTIVE_SOURCE_NOT_AVAILABLE,
            ));
        };
        self.write_active(&known)
    }

    pub fn clear_active_package_source(&self) -> Result<()> {
        self.settings.delete_section(ACTIVE_PACKAGE_SOURCE_SECTION)?;
        Ok(())
    }

    /// Display list plus the retained aggregate entry.
    fn known_sources(&self) -> Result<Vec<PackageSource>> {
        let stored = self.stored_sources()?;
        let mut known = display_sources(&stored);
        known.extend(stored.into_iter().find(|source| source.is_aggregate));
        Ok(known)
    }

    fn find_known(&self, candidate: &PackageSource) -> Result<Option<PackageSource>> {
        Ok(self
            .known_sources()?
            .into_iter()
            .find(|source| source == candidate))
    }

    fn recorded_active_location(&self) -> Result<Option<String>> {
        Ok(self
            .settings
            .get_values(ACTIVE_PACKAGE_SOURCE_SECTION)?
            .into_iter()
            .next()
            .map(|(_, location)| location))
    }

    fn write_active(&self, source: &PackageSource) -> Result<()> {
        self.settings.delete_section(ACTIVE_PACKAGE_SOURCE_SECTION)?;
        self.settings
            .set_value(ACTIVE_PACKAGE_SOURCE_SECTION, &source.name, &source.location)
    }
}

fn non_blank(payload: Option<String>) -> Option<String> {
    payload.filter(|payload| !payload.trim().is_empty())
}

/// Location under which a stored entry appears in the display list.
fn displayed_location(source: &PackageSource) -> &str {
    if !source.is_aggregate && source.is_default_source() {
        DEFAULT_SOURCE_LOCATION
    } else {
        &source.location
    }
}

/// Builds the user-facing list from the stored one.
fn display_sources(stored: &[PackageSource]) -> Vec<PackageSource> {
    let mut sources = Vec::with_capacity(stored.len() + 1);
    let mut has_default = false;

    for source in stored.iter().filter(|source| !source.is_aggregate) {
        if source.is_default_source() {
            if has_default {
                continue;
            }
            has_default = true;
            sources.push(PackageSource::default_source().with_enabled(source.is_enabled));
        } else {
            sources.push(source.clone());
        }
    }

    if !has_default {
        sources.insert(0, PackageSource::default_source());
    }
    sources
}
