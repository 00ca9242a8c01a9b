use serde::{Deserialize, Serialize};

/// One continuous interactive period and its replayable transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub started_at: i64,
    pub last_active_at: i64,
    pub transcript: Vec<SessionEntry>,
}

impl Session {
    /// Start a session at `now_ms` with a fresh random id.
    pub fn new(now_ms: i64) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), now_ms)
    }

    pub fn with_id(id: String, now_ms: i64) -> Self {
        Self {
            id,
            started_at: now_ms,
            last_active_at: now_ms,
            transcript: Vec::new(),
        }
    }

    /// Return a copy with `kind` appended at `now_ms`.
    ///
    /// `last_active_at` never moves backwards, even if the clock does.
    pub fn appended(&self, kind: EntryKind, now_ms: i64) -> Self {
        let mut transcript = self.transcript.clone();
        transcript.push(SessionEntry { kind, ts: now_ms });
        Self {
            id: self.id.clone(),
            started_at: self.started_at,
            last_active_at: self.last_active_at.max(now_ms),
            transcript,
        }
    }

    /// Id of the most recent `config-created` entry, if any.
    pub fn latest_config(&self) -> Option<&str> {
        self.transcript.iter().rev().find_map(|e| match &e.kind {
            EntryKind::ConfigCreated { config_id } => Some(config_id.as_str()),
            _ => None,
        })
    }

    /// Number of `config-created` entries in the transcript
    pub fn configs_created(&self) -> usize {
        self.transcript
            .iter()
            .filter(|e| matches!(e.kind, EntryKind::ConfigCreated { .. }))
            .count()
    }
}

/// A timestamped transcript record. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    #[serde(flatten)]
    pub kind: EntryKind,
    pub ts: i64,
}

/// Transcript record without its timestamp, as handed to `append`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EntryKind {
    /// User-submitted command text, with the prompt marker it was echoed
    /// under. Records written without a marker replay under the config
    /// marker alone.
    Input {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        marker: Option<String>,
    },
    /// A line emitted in response
    Output { text: String },
    /// Engine-level annotation, e.g. the restoration banner
    System { text: String },
    /// A prompt created an entity with this id
    ConfigCreated {
        #[serde(rename = "configId")]
        config_id: String,
    },
    /// The display was reset to the banner
    Cleared,
}

impl EntryKind {
    pub fn input(text: impl Into<String>) -> Self {
        EntryKind::Input {
            text: text.into(),
            marker: None,
        }
    }

    /// An input as it was echoed, e.g. `(workout) > ` + `workout status`.
    pub fn echoed(marker: impl Into<String>, text: impl Into<String>) -> Self {
        EntryKind::Input {
            text: text.into(),
            marker: Some(marker.into()),
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        EntryKind::Output { text: text.into() }
    }

    pub fn system(text: impl Into<String>) -> Self {
        EntryKind::System { text: text.into() }
    }

    pub fn config_created(config_id: impl Into<String>) -> Self {
        EntryKind::ConfigCreated {
            config_id: config_id.into(),
        }
    }
}
