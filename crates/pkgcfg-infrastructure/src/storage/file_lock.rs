use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// A file lock guard that releases the lock when dropped.
///
/// The lock lives in a sibling `<file>.lock` so the data file itself can be
/// replaced by rename while the lock is held. The lock file is never removed:
/// every writer must contend on the same inode.
pub(crate) struct FileLock {
    file: File,
}

impl FileLock {
    /// Acquires an exclusive lock guarding `path`, blocking until it is free.
    pub(crate) fn acquire(path: &Path) -> io::Result<Self> {
        // Create lock file path
        let lock_path = path.with_extension("lock");

        // Ensure parent directory exists
        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Open or create lock file
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Closing the handle releases the lock as well; unlocking first keeps it prompt.
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_lock_file_survives_release() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");

        drop(FileLock::acquire(&path).unwrap());

        assert!(temp_dir.path().join("settings.lock").exists());
        drop(FileLock::acquire(&path).unwrap());
    }

    #[test]
    fn test_second_holder_waits_for_release() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        let released = Arc::new(AtomicBool::new(false));

        let first = FileLock::acquire(&path).unwrap();
        let waiter = {
            let path = path.clone();
            let released = released.clone();
            thread::spawn(move || {
                let _second = FileLock::acquire(&path).unwrap();
                released.load(Ordering::SeqCst)
            })
        };

        thread::sleep(Duration::from_millis(50));
        released.store(true, Ordering::SeqCst);
        drop(first);

        assert!(waiter.join().unwrap(), "second lock acquired before the first was released");
    }
}
