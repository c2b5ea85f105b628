//! In-memory session registry. Sessions are process-local and lost on restart.
//!
//! Each session sits behind its own async mutex, which a submission holds for
//! its whole duration: at most one question is in flight per session.
//!
//! Sessions idle for longer than the store's TTL are dropped: lazily on lookup,
//! and in bulk by [`SessionStore::sweep_expired`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::interview::session::Session;

/// Idle time after which a session is dropped when no TTL is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
pub struct SessionRecord {
    pub session: Session,
    pub candidate_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(session: Session, candidate_name: Option<String>) -> Self {
        Self {
            session,
            candidate_name,
            created_at: Utc::now(),
        }
    }
}

struct Entry {
    record: Arc<Mutex<SessionRecord>>,
    last_active: Instant,
}

impl Entry {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.last_active) > ttl
    }

    /// A handler still holds the record (e.g. a submission awaiting feedback).
    fn in_use(&self) -> bool {
        Arc::strong_count(&self.record) > 1
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn insert(&self, record: SessionRecord) -> Uuid {
        let id = Uuid::new_v4();
        let entry = Entry {
            record: Arc::new(Mutex::new(record)),
            last_active: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        id
    }

    /// Looks up a live session and marks it active. An expired session is
    /// removed and reported as missing.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<SessionRecord>>> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let entry = sessions.get_mut(&id)?;
        if entry.is_expired(self.ttl, now) && !entry.in_use() {
            sessions.remove(&id);
            return None;
        }
        entry.last_active = now;
        Some(entry.record.clone())
    }

    /// Drops a session. Returns `false` if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Removes every idle session past the TTL; returns how many were dropped.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.in_use() || !entry.is_expired(self.ttl, now));
        before - sessions.len()
    }

    /// Runs [`Self::sweep_expired`] every `every` until the runtime shuts down.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let dropped = store.sweep_expired().await;
                if dropped > 0 {
                    info!(
                        "Dropped {dropped} idle interview sessions, {} active",
                        store.len().await
                    );
                }
            }
        })
    }
}
