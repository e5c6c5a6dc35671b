//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs describe on-disk formats and stay private to the
//! infrastructure layer; the rest of the workspace only sees the domain
//! types they convert into.
//!
//! ### Settings file version history
//! - **1.0.0**: Initial schema (`[[sections]]` with ordered `values` and `nested`)
//!
//! The legacy source payloads are not versioned; their schema is fixed by the
//! release that wrote them.

mod legacy_source;
mod settings_file;

pub use legacy_source::{PackageSourceArrayXml, PackageSourceXml};
pub use settings_file::{
    EntryV1, NestedGroupV1, SETTINGS_FILE_V1_VERSION, SectionV1, SettingsFileV1,
};
