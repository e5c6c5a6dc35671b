//! Atomic TOML file operations.
//!
//! Provides a thin layer for safe access to TOML settings files: readers see
//! either the old or the new content, never a partial write.

use pkgcfg_core::PkgcfgError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::FileLock;

/// Errors that can occur during atomic TOML operations.
#[derive(Debug)]
pub enum AtomicTomlError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML deserialization error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
    /// Error raised by the caller's update closure.
    Rejected(PkgcfgError),
}

impl std::fmt::Display for AtomicTomlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicTomlError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicTomlError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            AtomicTomlError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            AtomicTomlError::LockError(e) => write!(f, "Lock error: {}", e),
            AtomicTomlError::Rejected(e) => write!(f, "Update rejected: {}", e),
        }
    }
}

impl std::error::Error for AtomicTomlError {}

impl From<std::io::Error> for AtomicTomlError {
    fn from(e: std::io::Error) -> Self {
        AtomicTomlError::IoError(e)
    }
}

impl From<toml::de::Error> for AtomicTomlError {
    fn from(e: toml::de::Error) -> Self {
        AtomicTomlError::TomlError(e)
    }
}

impl From<toml::ser::Error> for AtomicTomlError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicTomlError::TomlSerError(e)
    }
}

impl From<PkgcfgError> for AtomicTomlError {
    fn from(e: PkgcfgError) -> Self {
        AtomicTomlError::Rejected(e)
    }
}

impl From<AtomicTomlError> for PkgcfgError {
    fn from(e: AtomicTomlError) -> Self {
        match e {
            AtomicTomlError::IoError(e) => e.into(),
            AtomicTomlError::TomlError(e) => e.into(),
            AtomicTomlError::TomlSerError(e) => e.into(),
            AtomicTomlError::LockError(message) => PkgcfgError::Lock(message),
            AtomicTomlError::Rejected(e) => e,
        }
    }
}

/// A handle to a TOML file with atomic replace semantics.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: `update` holds an exclusive file lock across read-modify-write
/// - **Durability**: Explicit fsync before rename
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the TOML file and deserializes it.
    ///
    /// If the file doesn't exist, returns `None`.
    /// If the file is empty, returns `None`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the TOML file atomically.
    ///
    /// Uses a temporary file + atomic rename to ensure durability.
    ///
    /// # Arguments
    ///
    /// * `data` - The data to serialize and save
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Successfully saved
    /// - `Err`: Failed to serialize or write the file
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Serialize to TOML
        let toml_string = toml::to_string_pretty(data)?;

        // Write to temporary file in the same directory
        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        // Atomic rename
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a read-modify-write under an exclusive file lock.
    ///
    /// The closure receives the current data (or `default_value` if the file
    /// doesn't exist). If it returns `Ok`, the data is written back atomically
    /// and the closure's result is returned; on `Err` nothing is written.
    ///
    /// # Arguments
    ///
    /// * `default_value` - Default value to use if file doesn't exist
    /// * `f` - Update function that modifies the data
    ///
    /// # Returns
    ///
    /// - `Ok(R)`: Update succeeded, carrying the closure's result
    /// - `Err`: Failed to acquire lock, read, update, or write
    pub fn update<R, F>(&self, default_value: T, f: F) -> Result<R, AtomicTomlError>
    where
        F: FnOnce(&mut T) -> Result<R, AtomicTomlError>,
    {
        // Acquire exclusive lock
        let _lock = self.acquire_lock()?;

        // Load current data
        let mut data = self.load()?.unwrap_or(default_value);

        // Apply update function
        let result = f(&mut data)?;

        // Save atomically
        self.save(&data)?;

        Ok(result)
    }

    /// Gets a temporary file path for atomic writes.
    fn get_temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicTomlError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicTomlError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }

    /// Acquires an exclusive file lock.
    ///
    /// Returns a lock guard that releases the lock when dropped.
    fn acquire_lock(&self) -> Result<FileLock, AtomicTomlError> {
        FileLock::acquire(&self.path)
            .map_err(|e| AtomicTomlError::LockError(format!("Failed to acquire lock: {}", e)))
    }
}
