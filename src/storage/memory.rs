//! In-memory storage backend
//!
//! Values live until the process exits. Used where there is no writable
//! filesystem (the browser build) and by tests.

use super::{Storage, StorageError};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.entries
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), data.to_vec());
        Ok(())
    }
}
