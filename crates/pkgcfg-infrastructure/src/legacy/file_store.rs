use pkgcfg_core::error::Result;
use pkgcfg_core::legacy::LegacySourceStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SOURCES_FILE_NAME: &str = "packageSources.xml";
pub const ACTIVE_SOURCE_FILE_NAME: &str = "activePackageSource.xml";

/// Legacy blobs kept as two files in one directory.
///
/// A missing file means the blob is absent; clearing a blob deletes its file.
#[derive(Debug, Clone)]
pub struct FileLegacySourceStore {
    dir: PathBuf,
}

impl FileLegacySourceStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, file_name: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.dir.join(file_name)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self, file_name: &str) -> Result<()> {
        match fs::remove_file(self.dir.join(file_name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl LegacySourceStore for FileLegacySourceStore {
    fn serialized_sources(&self) -> Result<Option<String>> {
        self.read(SOURCES_FILE_NAME)
    }

    fn clear_serialized_sources(&self) -> Result<()> {
        self.clear(SOURCES_FILE_NAME)
    }

    fn serialized_active_source(&self) -> Result<Option<String>> {
        self.read(ACTIVE_SOURCE_FILE_NAME)
    }

    fn clear_serialized_active_source(&self) -> Result<()> {
        self.clear(ACTIVE_SOURCE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLegacySourceStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.serialized_sources().unwrap(), None);
        store.clear_serialized_sources().unwrap();

        fs::write(temp_dir.path().join(SOURCES_FILE_NAME), "<ArrayOfPackageSource/>").unwrap();
        fs::write(temp_dir.path().join(ACTIVE_SOURCE_FILE_NAME), "<PackageSource/>").unwrap();

        assert_eq!(
            store.serialized_sources().unwrap().as_deref(),
            Some("<ArrayOfPackageSource/>")
        );
        store.clear_serialized_sources().unwrap();
        assert_eq!(store.serialized_sources().unwrap(), None);
        assert!(store.serialized_active_source().unwrap().is_some());

        store.clear_serialized_active_source().unwrap();
        assert_eq!(store.serialized_active_source().unwrap(), None);
    }
}
