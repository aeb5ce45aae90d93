//! Storage Abstraction Layer
//!
//! A small key-value interface over byte blobs. Keys are relative paths
//! ("progress.ron"). Two backends:
//! - `LocalStorage`: files under a base directory (native)
//! - `MemoryStorage`: a map that lives as long as the process (WASM, tests)
//!
//! Every operation completes immediately; callers get a plain `Result`.

#[cfg(not(target_arch = "wasm32"))]
pub mod local;
#[cfg(any(test, target_arch = "wasm32"))]
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use local::LocalStorage;
#[cfg(any(test, target_arch = "wasm32"))]
pub use memory::MemoryStorage;

use thiserror::Error;

/// Storage error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// Key has no stored value
    #[error("not found: {0}")]
    NotFound(String),
    /// Permission denied
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerdeError(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::IoError(e.to_string()),
        }
    }
}

/// Key-value persistence used by the progress store
pub trait Storage {
    /// Read a stored value
    fn read(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Create or overwrite a value
    fn write(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Read a value as a UTF-8 string
    fn read_string(&self, key: &str) -> Result<String, StorageError> {
        let data = self.read(key)?;
        String::from_utf8(data).map_err(|e| StorageError::SerdeError(e.to_string()))
    }
}
