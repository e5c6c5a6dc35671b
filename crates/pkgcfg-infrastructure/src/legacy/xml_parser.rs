use crate::dto::{PackageSourceArrayXml, PackageSourceXml};
use pkgcfg_core::error::Result;
use pkgcfg_core::legacy::LegacySourceParser;
use pkgcfg_core::source::PackageSource;

/// Parses the data-contract XML payloads of the legacy store.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlLegacySourceParser;

impl LegacySourceParser for XmlLegacySourceParser {
    fn parse_source_list(&self, payload: &str) -> Result<Vec<PackageSource>> {
        let array: PackageSourceArrayXml = quick_xml::de::from_str(payload)?;
        Ok(array.sources.into_iter().map(PackageSource::from).collect())
    }

    fn parse_active_source(&self, payload: &str) -> Result<PackageSource> {
        let record: PackageSourceXml = quick_xml::de::from_str(payload)?;
        Ok(record.into())
    }
}
