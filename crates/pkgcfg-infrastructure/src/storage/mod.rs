//! Storage layer for atomic file operations.

mod atomic_toml;
mod file_lock;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub(crate) use file_lock::FileLock;
