//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `term-core` (pure Rust).
//! Implementations live in `term-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.
//!
//! Everything is synchronous and single-threaded: the engine runs on the
//! browser main thread and no call suspends mid-command.

use term_types::Result;

// ─── Storage Port ────────────────────────────────────────────

/// Durable key-value medium for the history and session records.
pub trait StoragePort {
    /// Get a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Clock Port ──────────────────────────────────────────────

/// Wall-clock time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

// ─── Ticker Port ─────────────────────────────────────────────

/// Schedules a recurring callback.
pub trait Ticker {
    /// Call `callback` every `interval_ms` until the handle is cancelled
    /// or dropped.
    fn every(&self, interval_ms: u32, callback: Box<dyn FnMut()>) -> Box<dyn TickHandle>;
}

/// Owner of a scheduled tick. Dropping it must also stop the tick.
pub trait TickHandle {
    fn cancel(self: Box<Self>);
}
