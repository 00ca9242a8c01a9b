//! `window.localStorage` backend.
//! Persistent across page reloads; values are stored as JSON text.

use term_core::ports::StoragePort;
use term_types::{Result, TermError};
use web_sys::Storage;

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the page's localStorage. Fails when there is no window (Node,
    /// workers) or the browser denies access, e.g. with cookies disabled.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| TermError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| TermError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| TermError::Storage("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

impl StoragePort for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| TermError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| TermError::Storage(format!("{:?}", e)))
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| TermError::Storage(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
