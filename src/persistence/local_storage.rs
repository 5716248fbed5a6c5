//! Browser LocalStorage backend

use super::{LevelStore, Result, StoreError};

#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "gravita_levels";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".into()))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl LevelStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn write(&mut self, json: &str) -> Result<()> {
        Self::storage()?
            .set_item(&self.key, json)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
