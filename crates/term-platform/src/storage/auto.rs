//! Pick the storage backend named by the config.
//!
//! `Auto` priority: localStorage → Memory (fallback)

use std::rc::Rc;
use term_core::ports::StoragePort;
use term_types::config::{StorageBackendType, StorageConfig};
use super::{LocalStorage, MemoryStorage};

/// Open the configured backend, falling back to memory when the browser
/// store is unavailable. Never fails: the terminal keeps working, it just
/// forgets on reload.
pub fn auto_detect_storage(config: &StorageConfig) -> Rc<dyn StoragePort> {
    if config.backend == StorageBackendType::Memory {
        log::info!("Storage backend: {} (configured)", config.backend.label());
        return Rc::new(MemoryStorage::new());
    }

    match LocalStorage::open() {
        Ok(local) => {
            log::info!("Storage backend: {}", StorageBackendType::LocalStorage.label());
            Rc::new(local)
        }
        Err(e) => {
            log::warn!(
                "{} unavailable ({}), falling back to {}",
                StorageBackendType::LocalStorage.label(),
                e,
                StorageBackendType::Memory.label()
            );
            Rc::new(MemoryStorage::new())
        }
    }
}
