//! Level storage backends
//!
//! A store holds one JSON document: the whole level collection. Saves are
//! full overwrites; there is no versioning or migration.

mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid level {index}: {reason}")]
    InvalidLevel { index: usize, reason: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Somewhere to keep the serialized level collection
pub trait LevelStore {
    /// The stored document, or `None` if nothing was saved yet
    fn read(&self) -> Result<Option<String>>;
    /// Replace the stored document
    fn write(&mut self, json: &str) -> Result<()>;
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    doc: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(json: impl Into<String>) -> Self {
        Self {
            doc: Some(json.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

impl LevelStore for MemoryStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.doc.clone())
    }

    fn write(&mut self, json: &str) -> Result<()> {
        self.doc = Some(json.to_owned());
        Ok(())
    }
}
