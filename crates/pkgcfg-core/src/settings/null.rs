use std::sync::Arc;

use super::{SettingValue, Settings};
use crate::error::Result;

/// A store with nothing behind it.
///
/// Reads come back empty and writes are dropped without error. Used wherever
/// an optional settings file is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSettings;

impl NullSettings {
    pub fn shared() -> Arc<dyn Settings> {
        Arc::new(NullSettings)
    }
}

impl Settings for NullSettings {
    fn get_value(&self, _section: &str, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn get_values(&self, _section: &str) -> Result<Vec<SettingValue>> {
        Ok(Vec::new())
    }

    fn get_nested_values(&self, _section: &str, _key: &str) -> Result<Vec<SettingValue>> {
        Ok(Vec::new())
    }

    fn set_value(&self, _section: &str, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn set_values(&self, _section: &str, _values: &[SettingValue]) -> Result<()> {
        Ok(())
    }

    fn set_nested_values(&self, _section: &str, _key: &str, _values: &[SettingValue]) -> Result<()> {
        Ok(())
    }

    fn delete_value(&self, _section: &str, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn delete_section(&self, _section: &str) -> Result<bool> {
        Ok(false)
    }
}
