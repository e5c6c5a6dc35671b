//! In-memory model of a settings store.
//!
//! Every concrete store (file-backed or in-memory) keeps its data as a
//! [`SettingsDocument`] so that section lookup and upsert rules are identical
//! across backends.

use super::SettingValue;

/// Compares section names the way every store does: ASCII case-insensitive.
pub fn section_name_eq(left: &str, right: &str) -> bool {
    left.eq_ignore_ascii_case(right)
}

/// A named bucket of ordered pairs plus ordered nested groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSection {
    pub name: String,
    pub values: Vec<SettingValue>,
    pub nested: Vec<(String, Vec<SettingValue>)>,
}

impl SettingsSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            nested: Vec::new(),
        }
    }

    fn upsert(&mut self, key: &str, value: &str) {
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.values.push((key.to_string(), value.to_string())),
        }
    }
}

/// Ordered collection of sections with the store's read/write rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDocument {
    sections: Vec<SettingsSection>,
}

impl SettingsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from sections in their stored order.
    pub fn from_sections(sections: Vec<SettingsSection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[SettingsSection] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<SettingsSection> {
        self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, name: &str) -> Option<&SettingsSection> {
        self.sections
            .iter()
            .find(|section| section_name_eq(&section.name, name))
    }

    fn section_mut_or_insert(&mut self, name: &str) -> &mut SettingsSection {
        let index = match self
            .sections
            .iter()
            .position(|section| section_name_eq(&section.name, name))
        {
            Some(index) => index,
            None => {
                self.sections.push(SettingsSection::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    pub fn get_value(&self, section: &str, key: &str) -> Option<String> {
        self.section(section)?
            .values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn get_values(&self, section: &str) -> Vec<SettingValue> {
        self.section(section)
            .map(|section| section.values.clone())
            .unwrap_or_default()
    }

    pub fn get_nested_values(&self, section: &str, key: &str) -> Vec<SettingValue> {
        self.section(section)
            .and_then(|section| section.nested.iter().find(|(k, _)| k == key))
            .map(|(_, values)| values.clone())
            .unwrap_or_default()
    }

    pub fn set_value(&mut self, section: &str, key: &str, value: &str) {
        self.section_mut_or_insert(section).upsert(key, value);
    }

    pub fn set_values(&mut self, section: &str, values: &[SettingValue]) {
        let section = self.section_mut_or_insert(section);
        for (key, value) in values {
            section.upsert(key, value);
        }
    }

    pub fn set_nested_values(&mut self, section: &str, key: &str, values: &[SettingValue]) {
        let section = self.section_mut_or_insert(section);
        match section.nested.iter_mut().find(|(k, _)| k == key) {
            Some(group) => group.1 = values.to_vec(),
            None => section.nested.push((key.to_string(), values.to_vec())),
        }
    }

    pub fn delete_value(&mut self, section: &str, key: &str) -> bool {
        let Some(section) = self
            .sections
            .iter_mut()
            .find(|s| section_name_eq(&s.name, section))
        else {
            return false;
        };
        let before = section.values.len();
        section.values.retain(|(k, _)| k != key);
        section.values.len() != before
    }

    pub fn delete_section(&mut self, section: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| !section_name_eq(&s.name, section));
        self.sections.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> SettingValue {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_section_names_are_case_insensitive() {
        let mut doc = SettingsDocument::new();
        doc.set_value("PackageSources", "a", "1");

        assert_eq!(doc.get_value("packagesources", "a"), Some("1".to_string()));
        assert_eq!(doc.sections().len(), 1);
        assert!(doc.delete_section("PACKAGESOURCES"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut doc = SettingsDocument::new();
        doc.set_value("config", "Key", "1");

        assert_eq!(doc.get_value("config", "key"), None);
    }

    #[test]
    fn test_set_values_upserts_in_place() {
        let mut doc = SettingsDocument::new();
        doc.set_values("s", &[pair("a", "1"), pair("b", "2")]);
        doc.set_values("s", &[pair("a", "10"), pair("c", "3")]);

        assert_eq!(
            doc.get_values("s"),
            vec![pair("a", "10"), pair("b", "2"), pair("c", "3")]
        );
    }

    #[test]
    fn test_nested_values_replace_group() {
        let mut doc = SettingsDocument::new();
        doc.set_nested_values("s", "group", &[pair("x", "1"), pair("y", "2")]);
        doc.set_nested_values("s", "group", &[pair("z", "3")]);

        assert_eq!(doc.get_nested_values("s", "group"), vec![pair("z", "3")]);
        assert!(doc.get_nested_values("s", "missing").is_empty());
        assert!(doc.get_nested_values("missing", "group").is_empty());
    }

    #[test]
    fn test_delete_value_reports_existence() {
        let mut doc = SettingsDocument::new();
        doc.set_value("s", "a", "1");

        assert!(doc.delete_value("s", "a"));
        assert!(!doc.delete_value("s", "a"));
        assert!(!doc.delete_value("missing", "a"));
        assert!(!doc.delete_section("missing"));
    }
}
