//! In-memory store of running quiz sessions.
//!
//! Every access locks the store, so calls for one session never overlap.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use quiz_core::Session;
use uuid::Uuid;

struct Entry {
    session: Session,
    last_active: DateTime<Utc>,
}

/// Sessions keyed by id, evicted after a period of inactivity.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Entry>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new session and return its id.
    pub fn insert(&self, session: Session, now: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().insert(
            id,
            Entry {
                session,
                last_active: now,
            },
        );
        id
    }

    /// Run `f` against a session, marking it active.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Option<T> {
        let mut sessions = self.lock();
        let entry = sessions.get_mut(&id)?;
        entry.last_active = now;
        Some(f(&mut entry.session))
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.lock().remove(&id).is_some()
    }

    /// Drop sessions idle for longer than the timeout. Returns how many were dropped.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_active <= self.idle_timeout);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
