//! Session port trait
//!
//! Server-side key/value storage scoped to one visitor session. Session
//! identity and expiry belong to the implementation.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::SessionId;
use crate::error::DomainError;

/// A session resolved from the visitor's cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedSession {
    pub id: SessionId,
    /// The visitor needs a new cookie
    pub is_new: bool,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve the token from the cookie. Missing, malformed, unknown or
    /// expired tokens yield a fresh session.
    async fn load(&self, token: Option<&str>) -> Result<LoadedSession, DomainError>;

    /// Read a value; an unknown or expired session reads as empty
    async fn get(&self, session: &SessionId, key: &str) -> Result<Option<Value>, DomainError>;

    /// Write a value, replacing any previous one under the same key
    async fn put(&self, session: &SessionId, key: &str, value: Value) -> Result<(), DomainError>;

    /// Remove a value and return it; removing a missing key is a no-op
    async fn remove(&self, session: &SessionId, key: &str) -> Result<Option<Value>, DomainError>;
}
