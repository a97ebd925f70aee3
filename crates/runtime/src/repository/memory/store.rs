//! In-memory Store implementation for tests and local runs.

use std::io;
use std::sync::RwLock;

use stats_core::AppData;

use crate::repository::{
    RepositoryError, Result, Store, StoreReader, StoreWriter, document,
};

/// In-memory implementation of [`Store`].
///
/// Holds the encoded document rather than the aggregate, so reads go through
/// the same parsing and validation as the file store.
pub struct InMemoryStore {
    document: RwLock<Option<String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            document: RwLock::new(None),
        }
    }

    /// Create a store holding raw document text.
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(Some(text.into())),
        }
    }

    /// Current document text, if any.
    pub fn document(&self) -> Result<Option<String>> {
        let document = self
            .document
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(document.clone())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreWriter for InMemoryStore {
    fn write(&self, data: &AppData) -> Result<()> {
        let json = document::encode(data)?;
        let mut document = self
            .document
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *document = Some(json);
        Ok(())
    }
}

impl StoreReader for InMemoryStore {
    fn read(&self) -> Result<AppData> {
        let document = self
            .document
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match document.as_deref() {
            Some(text) => document::decode(text),
            None => Err(RepositoryError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "in-memory store is empty",
            ))),
        }
    }

    fn exists(&self) -> bool {
        self.document
            .read()
            .map(|document| document.is_some())
            .unwrap_or(false)
    }
}

impl Store for InMemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }
}
