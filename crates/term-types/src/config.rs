use serde::{Deserialize, Serialize};

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of commands kept in the recall buffer
    pub history_max_entries: usize,
    /// Idle time after which a stored session is no longer replayed
    pub session_timeout_ms: i64,
    /// Interval of the elapsed-time tick while a timed activity runs
    pub tick_interval_ms: u32,
    pub storage: StorageConfig,
    /// Lines shown on a fresh display and after `clear`
    pub banner: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_max_entries: 50,
            session_timeout_ms: 30 * 60 * 1000,
            tick_interval_ms: 1000,
            storage: StorageConfig::default(),
            banner: DEFAULT_BANNER.iter().map(|l| l.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    pub history_key: String,
    pub session_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
            history_key: "terminal:history".to_string(),
            session_key: "terminal:session".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    Auto,
    Memory,
    LocalStorage,
}

impl StorageBackendType {
    pub fn label(&self) -> &'static str {
        match self {
            StorageBackendType::Auto => "Auto",
            StorageBackendType::Memory => "Memory",
            StorageBackendType::LocalStorage => "localStorage",
        }
    }
}

const DEFAULT_BANNER: &[&str] = &["Homelab Fitness Terminal", "Type 'help' to begin.", ""];
