use pkgcfg_core::error::{PkgcfgError, Result};
use pkgcfg_core::settings::{SettingValue, SettingsDocument, SettingsSection};
use semver::Version;
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE_V1_VERSION: &str = "1.0.0";

/// Root of a `pkgcfg.toml` file.
///
/// Sections, pairs and nested groups are arrays so their order survives a
/// round trip through TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFileV1 {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionV1>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionV1 {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<EntryV1>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<NestedGroupV1>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryV1 {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedGroupV1 {
    pub key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<EntryV1>,
}

impl Default for SettingsFileV1 {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_FILE_V1_VERSION.to_string(),
            sections: Vec::new(),
        }
    }
}

impl SettingsFileV1 {
    /// Rejects files written by a newer, incompatible release.
    pub fn ensure_supported(&self) -> Result<()> {
        let found = Version::parse(&self.schema_version)?;
        let supported = Version::parse(SETTINGS_FILE_V1_VERSION)?;
        if found.major > supported.major {
            return Err(PkgcfgError::config(format!(
                "Settings schema {} is newer than supported {}",
                found, supported
            )));
        }
        Ok(())
    }
}

fn entries_to_pairs(entries: Vec<EntryV1>) -> Vec<SettingValue> {
    entries.into_iter().map(|e| (e.key, e.value)).collect()
}

fn pairs_to_entries(pairs: &[SettingValue]) -> Vec<EntryV1> {
    pairs
        .iter()
        .map(|(key, value)| EntryV1 {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

impl From<SettingsFileV1> for SettingsDocument {
    fn from(dto: SettingsFileV1) -> Self {
        let sections = dto
            .sections
            .into_iter()
            .map(|section| SettingsSection {
                name: section.name,
                values: entries_to_pairs(section.values),
                nested: section
                    .nested
                    .into_iter()
                    .map(|group| (group.key, entries_to_pairs(group.values)))
                    .collect(),
            })
            .collect();
        SettingsDocument::from_sections(sections)
    }
}

impl From<&SettingsDocument> for SettingsFileV1 {
    fn from(document: &SettingsDocument) -> Self {
        let sections = document
            .sections()
            .iter()
            .map(|section| SectionV1 {
                name: section.name.clone(),
                values: pairs_to_entries(&section.values),
                nested: section
                    .nested
                    .iter()
                    .map(|(key, values)| NestedGroupV1 {
                        key: key.clone(),
                        values: pairs_to_entries(values),
                    })
                    .collect(),
            })
            .collect();
        Self {
            schema_version: SETTINGS_FILE_V1_VERSION.to_string(),
            sections,
        }
    }
}
