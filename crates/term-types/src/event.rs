use serde::{Deserialize, Serialize};

/// Events emitted by the line engine.
/// The renderer subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    /// A fresh session was created and persisted
    SessionStarted { id: String },

    /// A stored transcript was replayed into the display
    SessionRestored { id: String, entries: usize },

    /// A prompt finished and created a new entity
    ConfigCreated { id: String },

    /// Elapsed-time tick while a timed activity runs
    Tick { elapsed_ms: i64 },

    /// The recurring tick was cancelled
    TickStopped,

    /// The display was reset to the banner
    Cleared,
}
