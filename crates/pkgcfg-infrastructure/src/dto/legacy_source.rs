//! Data-contract XML written by the legacy source store.
//!
//! ```xml
//! <ArrayOfPackageSource xmlns="http://schemas.datacontract.org/2004/07/NuGet">
//!   <PackageSource>
//!     <IsAggregate>false</IsAggregate>
//!     <Name>name1</Name>
//!     <Source>source1</Source>
//!   </PackageSource>
//! </ArrayOfPackageSource>
//! ```
//!
//! Namespace attributes are ignored. `IsEnabled` and `IsAggregate` are
//! optional; older payloads omit them.

use pkgcfg_core::source::PackageSource;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "ArrayOfPackageSource")]
pub struct PackageSourceArrayXml {
    #[serde(rename = "PackageSource", default)]
    pub sources: Vec<PackageSourceXml>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "PackageSource")]
pub struct PackageSourceXml {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "IsEnabled", default = "default_enabled")]
    pub is_enabled: bool,
    #[serde(rename = "IsAggregate", default)]
    pub is_aggregate: bool,
}

fn default_enabled() -> bool {
    true
}

impl From<PackageSourceXml> for PackageSource {
    fn from(dto: PackageSourceXml) -> Self {
        PackageSource::new(dto.source, dto.name)
            .with_enabled(dto.is_enabled)
            .with_aggregate(dto.is_aggregate)
    }
}
