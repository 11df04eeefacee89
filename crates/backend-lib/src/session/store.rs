// ============================
// crates/backend-lib/src/session/store.rs
// ============================
//! Session storage abstraction with an in-memory implementation.
use async_trait::async_trait;
use dashmap::DashMap;
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

use super::clock::{duration_millis, Clock, Millis};
use super::error::SessionError;
use super::record::SessionRecord;

/// Key-value session storage keyed by an opaque session key.
///
/// Implementations must be safe for concurrent use across unrelated keys and
/// must apply a single `set` atomically.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fields of a live session, or `None` if unknown or expired.
    async fn get(&self, key: &str) -> Result<Option<SessionRecord>, SessionError>;

    /// Replace the session's fields and expire it `max_age` from now.
    async fn set(&self, key: &str, record: SessionRecord, max_age: Duration) -> Result<(), SessionError>;
}

#[derive(Debug, Clone)]
struct StoredSession {
    record: SessionRecord,
    expires_at: Millis,
}

/// Process-local session store. Expired entries are dropped lazily on read
/// and in bulk by [`MemorySessionStore::purge_expired`].
pub struct MemorySessionStore {
    sessions: DashMap<String, StoredSession>,
    clock: Arc<dyn Clock>,
}

impl MemorySessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: DashMap::new(),
            clock,
        }
    }

    /// Number of stored sessions, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops every expired session and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| now < s.expires_at);
        before.saturating_sub(self.sessions.len())
    }

    /// Runs [`purge_expired`](Self::purge_expired) every `every` until the
    /// returned handle is aborted.
    pub fn spawn_cleanup(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = self.purge_expired();
                if removed > 0 {
                    tracing::debug!(removed, remaining = self.len(), "purged expired sessions");
                }
            }
        })
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<SessionRecord>, SessionError> {
        let now = self.clock.now_millis();
        match self.sessions.get(key) {
            None => return Ok(None),
            Some(entry) if now < entry.expires_at => return Ok(Some(entry.record.clone())),
            Some(_) => {}
        }
        // read guard is released above; re-check in case of a concurrent set
        self.sessions.remove_if(key, |_, s| now >= s.expires_at);
        Ok(None)
    }

    async fn set(&self, key: &str, record: SessionRecord, max_age: Duration) -> Result<(), SessionError> {
        let expires_at = self
            .clock
            .now_millis()
            .saturating_add(duration_millis(max_age));
        self.sessions
            .insert(key.to_string(), StoredSession { record, expires_at });
        Ok(())
    }
}
