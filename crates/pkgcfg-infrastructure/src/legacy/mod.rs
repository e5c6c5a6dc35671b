//! Legacy source store implementations and the payload parser.

mod file_store;
mod memory_store;
mod xml_parser;

pub use file_store::{ACTIVE_SOURCE_FILE_NAME, FileLegacySourceStore, SOURCES_FILE_NAME};
pub use memory_store::MemoryLegacySourceStore;
pub use xml_parser::XmlLegacySourceParser;
