//! Append-only transcript persistence with expiry.
//!
//! The store is explicit state: `append` takes the current session and
//! returns the next one, persisting it as a side effect. Callers must keep
//! using the most recently returned value; the persisted copy is
//! last-write-wins.

use std::rc::Rc;
use term_types::session::{EntryKind, Session};
use term_types::Result;
use crate::ports::{Clock, StoragePort};

pub struct SessionStore {
    storage: Rc<dyn StoragePort>,
    clock: Rc<dyn Clock>,
    key: String,
    timeout_ms: i64,
}

impl SessionStore {
    pub fn new(
        storage: Rc<dyn StoragePort>,
        clock: Rc<dyn Clock>,
        key: impl Into<String>,
        timeout_ms: i64,
    ) -> Self {
        Self {
            storage,
            clock,
            key: key.into(),
            timeout_ms,
        }
    }

    /// Load the stored session.
    ///
    /// Unparseable or expired records are purged and read as `None`.
    pub fn load(&self) -> Option<Session> {
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Session storage unavailable: {}", e);
                return None;
            }
        };

        let session: Session = match serde_json::from_str(&raw) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Discarding corrupt session record: {}", e);
                self.clear();
                return None;
            }
        };

        if self.is_expired(&session) {
            log::info!("Session {} expired, discarding", session.id);
            self.clear();
            return None;
        }
        Some(session)
    }

    /// Create and immediately persist a fresh session.
    pub fn create_new(&self) -> Session {
        let session = Session::new(self.clock.now_ms());
        self.persist(&session);
        log::info!("Started session {}", session.id);
        session
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.storage.set(&self.key, &json)
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.delete(&self.key) {
            log::warn!("Failed to clear session record: {}", e);
        }
    }

    /// A session is expired once `timeout_ms` or more has passed since its
    /// last activity.
    pub fn is_expired(&self, session: &Session) -> bool {
        self.clock.now_ms() - session.last_active_at >= self.timeout_ms
    }

    /// Append `kind` stamped with the current time and persist the result.
    pub fn append(&self, session: &Session, kind: EntryKind) -> Session {
        let updated = session.appended(kind, self.clock.now_ms());
        self.persist(&updated);
        updated
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.save(session) {
            log::warn!("Failed to persist session {}: {}", session.id, e);
        }
    }
}
