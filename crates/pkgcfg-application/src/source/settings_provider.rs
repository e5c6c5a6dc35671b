//! Settings-backed source list persistence.
//!
//! ```text
//! [packageSources]
//!   values: "1" → location, "2" → location, ...   (list order)
//!   nested: "1" → [name, isEnabled, isAggregate]
//! ```
//!
//! Entries are keyed by position so neither names nor locations need to be
//! unique.

use pkgcfg_core::error::Result;
use pkgcfg_core::settings::{SettingValue, Settings};
use pkgcfg_core::source::{PackageSource, PackageSourceProvider};
use std::sync::Arc;

/// Section holding one record per source, in list order.
pub const PACKAGE_SOURCES_SECTION: &str = "packageSources";
/// Section holding the single `name → location` pair of the active source.
pub const ACTIVE_PACKAGE_SOURCE_SECTION: &str = "activePackageSource";

const NAME_KEY: &str = "name";
const IS_ENABLED_KEY: &str = "isEnabled";
const IS_AGGREGATE_KEY: &str = "isAggregate";

/// [`PackageSourceProvider`] over any [`Settings`] store.
pub struct SettingsPackageSourceProvider {
    settings: Arc<dyn Settings>,
}

impl SettingsPackageSourceProvider {
    pub fn new(settings: Arc<dyn Settings>) -> Self {
        Self { settings }
    }

    fn entry_key(index: usize) -> String {
        (index + 1).to_string()
    }

    fn read<'a>(record: &'a [SettingValue], key: &str) -> Option<&'a str> {
        record
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn read_flag(record: &[SettingValue], key: &str, default: bool) -> bool {
        match Self::read(record, key).map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            _ => default,
        }
    }
}

impl PackageSourceProvider for SettingsPackageSourceProvider {
    fn load_package_sources(&self) -> Result<Vec<PackageSource>> {
        let entries = self.settings.get_values(PACKAGE_SOURCES_SECTION)?;
        let mut sources = Vec::with_capacity(entries.len());
        for (key, location) in entries {
            let record = self.settings.get_nested_values(PACKAGE_SOURCES_SECTION, &key)?;
            // A record without a name falls back to its location.
            let name = Self::read(&record, NAME_KEY).unwrap_or(location.as_str()).to_string();
            sources.push(
                PackageSource::new(location, name)
                    .with_enabled(Self::read_flag(&record, IS_ENABLED_KEY, true))
                    .with_aggregate(Self::read_flag(&record, IS_AGGREGATE_KEY, false)),
            );
        }
        Ok(sources)
    }

    fn save_package_sources(&self, sources: &[PackageSource]) -> Result<()> {
        self.settings.delete_section(PACKAGE_SOURCES_SECTION)?;
        if sources.is_empty() {
            return Ok(());
        }

        let entries: Vec<SettingValue> = sources
            .iter()
            .enumerate()
            .map(|(index, source)| (Self::entry_key(index), source.location.clone()))
            .collect();
        self.settings.set_values(PACKAGE_SOURCES_SECTION, &entries)?;

        for (index, source) in sources.iter().enumerate() {
            let record = [
                (NAME_KEY.to_string(), source.name.clone()),
                (IS_ENABLED_KEY.to_string(), source.is_enabled.to_string()),
                (IS_AGGREGATE_KEY.to_string(), source.is_aggregate.to_string()),
            ];
            self.settings
                .set_nested_values(PACKAGE_SOURCES_SECTION, &Self::entry_key(index), &record)?;
        }
        tracing::debug!("Persisted {} package source(s)", sources.len());
        Ok(())
    }
}
