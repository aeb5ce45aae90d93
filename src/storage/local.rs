//! Local filesystem storage backend
//!
//! Each key is a file under the base directory. Writes create missing
//! parent directories.

use super::{Storage, StorageError};
use std::path::{Path, PathBuf};

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for keys (the progress data directory)
    base_dir: PathBuf,
}

impl LocalStorage {
    /// Create a local storage backend with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a key relative to the base directory
    fn resolve(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

impl Storage for LocalStorage {
    fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        Ok(std::fs::read(self.resolve(key))?)
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(key);

        // Ensure parent directory exists
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(std::fs::write(&full_path, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_write_and_read() {
        let (_dir, storage) = setup_test_dir();

        let data = b"hello world";
        storage.write("test.txt", data).unwrap();

        assert_eq!(storage.read("test.txt").unwrap(), data);
        assert_eq!(storage.read_string("test.txt").unwrap(), "hello world");
    }

    #[test]
    fn test_read_not_found() {
        let (_dir, storage) = setup_test_dir();

        let result = storage.read("nonexistent.txt");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_overwrite() {
        let (dir, storage) = setup_test_dir();

        std::fs::write(dir.path().join("value.txt"), "old").unwrap();
        storage.write("value.txt", b"new").unwrap();

        assert_eq!(storage.read_string("value.txt").unwrap(), "new");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let (dir, _) = setup_test_dir();
        let storage = LocalStorage::with_base_dir(dir.path().join("skyhop"));

        storage.write("nested/file.txt", b"data").unwrap();
        assert_eq!(storage.read("nested/file.txt").unwrap(), b"data");
        assert!(storage.base_dir().join("nested").is_dir());
    }
}
