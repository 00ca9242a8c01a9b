//! WASM-target tests for term-platform (Node.js runtime).
//!
//! Tests MemoryStorage, backend detection and SystemClock under
//! wasm32-unknown-unknown via `wasm-pack test --node`.
//!
//! Node has no `window`, so localStorage is exercised only through the
//! memory fallback here.

use wasm_bindgen_test::*;

use std::rc::Rc;
use term_core::history::HistoryStore;
use term_core::ports::{Clock, StoragePort};
use term_core::session_store::SessionStore;
use term_platform::storage::{auto_detect_storage, LocalStorage, MemoryStorage};
use term_platform::SystemClock;
use term_types::config::{StorageBackendType, StorageConfig};
use term_types::session::EntryKind;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    assert!(storage.get("nonexistent").unwrap().is_none());
}

#[wasm_bindgen_test]
fn memory_storage_set_get_overwrite() {
    let storage = MemoryStorage::new();
    storage.set("key", "v1").unwrap();
    storage.set("key", "v2").unwrap();
    assert_eq!(storage.get("key").unwrap().as_deref(), Some("v2"));
}

#[wasm_bindgen_test]
fn memory_storage_delete() {
    let storage = MemoryStorage::new();
    storage.set("key", "val").unwrap();
    storage.delete("key").unwrap();
    assert!(storage.get("key").unwrap().is_none());
    storage.delete("nonexistent").unwrap();
}

// ─── Backend Detection Tests ─────────────────────────────

#[wasm_bindgen_test]
fn local_storage_unavailable_without_window() {
    assert!(LocalStorage::open().is_err());
}

#[wasm_bindgen_test]
fn auto_detect_falls_back_to_memory() {
    let storage = auto_detect_storage(&StorageConfig::default());
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
fn auto_detect_honours_memory_config() {
    let config = StorageConfig {
        backend: StorageBackendType::Memory,
        ..StorageConfig::default()
    };
    assert_eq!(auto_detect_storage(&config).backend_name(), "memory");
}

// ─── Clock Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn system_clock_is_epoch_millis() {
    let clock = SystemClock;
    let a = clock.now_ms();
    let b = clock.now_ms();
    // 2020-01-01T00:00:00Z
    assert!(a > 1_577_836_800_000);
    assert!(b >= a);
}

// ─── Store Integration Tests ─────────────────────────────

#[wasm_bindgen_test]
fn stores_persist_through_memory_backend() {
    let storage: Rc<dyn StoragePort> = Rc::new(MemoryStorage::new());

    let history = HistoryStore::new(storage.clone(), "terminal:history", 50);
    history.add("workout start");
    assert_eq!(history.load(), vec!["workout start"]);

    let sessions = SessionStore::new(storage.clone(), Rc::new(SystemClock), "terminal:session", 60_000);
    let session = sessions.create_new();
    let session = sessions.append(&session, EntryKind::input("workout start"));
    assert_eq!(sessions.load(), Some(session));
}
