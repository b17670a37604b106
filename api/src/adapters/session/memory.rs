//! In-memory session store
//!
//! Sessions live in a concurrent map keyed by session ID. Each session has an
//! absolute lifetime measured from creation; expired sessions read as empty
//! and are purged by a background sweeper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;

use crate::domain::entities::SessionId;
use crate::domain::ports::{LoadedSession, SessionStore};
use crate::error::DomainError;

struct SessionEntry {
    values: HashMap<String, Value>,
    expires_at: DateTime<Utc>,
}

impl SessionEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionEntry>,
    lifetime: chrono::Duration,
}

impl InMemorySessionStore {
    pub fn new(lifetime: chrono::Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            lifetime,
        }
    }

    fn fresh_entry(&self) -> SessionEntry {
        SessionEntry {
            values: HashMap::new(),
            expires_at: Utc::now() + self.lifetime,
        }
    }

    fn create(&self) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id, self.fresh_entry());
        id
    }

    fn is_live(&self, id: &SessionId) -> bool {
        let now = Utc::now();
        self.sessions
            .get(id)
            .map(|entry| !entry.is_expired(now))
            .unwrap_or(false)
    }

    /// Drop every expired session, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, token: Option<&str>) -> Result<LoadedSession, DomainError> {
        if let Some(id) = token.and_then(|t| t.parse::<SessionId>().ok()) {
            if self.is_live(&id) {
                return Ok(LoadedSession { id, is_new: false });
            }
        }

        let id = self.create();
        tracing::debug!(session = %id, "Started new session");
        Ok(LoadedSession { id, is_new: true })
    }

    async fn get(&self, session: &SessionId, key: &str) -> Result<Option<Value>, DomainError> {
        let now = Utc::now();
        Ok(self
            .sessions
            .get(session)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.values.get(key).cloned()))
    }

    async fn put(&self, session: &SessionId, key: &str, value: Value) -> Result<(), DomainError> {
        let now = Utc::now();
        let mut entry = self
            .sessions
            .entry(*session)
            .or_insert_with(|| self.fresh_entry());
        if entry.is_expired(now) {
            *entry = self.fresh_entry();
        }
        entry.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, session: &SessionId, key: &str) -> Result<Option<Value>, DomainError> {
        let now = Utc::now();
        match self.sessions.get_mut(session) {
            Some(mut entry) if !entry.is_expired(now) => Ok(entry.values.remove(key)),
            _ => Ok(None),
        }
    }
}

/// Background task that periodically drops expired sessions
pub async fn run_session_sweeper(store: Arc<InMemorySessionStore>, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        let purged = store.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired sessions");
        }
    }
}
