//! Reservation session store
//!
//! Typed view over the visitor's session holding at most one reservation
//! draft, the range of the last availability search and the one-shot summary
//! shown after a successful booking. Expiry is left to the session store.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::entities::{DateRange, ReservationDraft, ReservationSummary, SessionId};
use crate::domain::ports::SessionStore;
use crate::error::DomainError;

const DRAFT_KEY: &str = "reservation";
const SEARCH_RANGE_KEY: &str = "search_range";
const SUMMARY_KEY: &str = "reservation_summary";

pub struct ReservationSessionStore<SS>
where
    SS: SessionStore,
{
    sessions: Arc<SS>,
}

impl<SS> ReservationSessionStore<SS>
where
    SS: SessionStore,
{
    pub fn new(sessions: Arc<SS>) -> Self {
        Self { sessions }
    }

    /// Store the draft, replacing any previous one (no merge)
    pub async fn put(&self, session: &SessionId, draft: &ReservationDraft) -> Result<(), DomainError> {
        self.write(session, DRAFT_KEY, draft).await
    }

    pub async fn get(&self, session: &SessionId) -> Result<Option<ReservationDraft>, DomainError> {
        self.read(session, DRAFT_KEY).await
    }

    /// Drop the draft; clearing an empty slot is a no-op
    pub async fn clear(&self, session: &SessionId) -> Result<(), DomainError> {
        self.sessions.remove(session, DRAFT_KEY).await?;
        Ok(())
    }

    pub async fn put_search_range(
        &self,
        session: &SessionId,
        range: &DateRange,
    ) -> Result<(), DomainError> {
        self.write(session, SEARCH_RANGE_KEY, range).await
    }

    pub async fn search_range(&self, session: &SessionId) -> Result<Option<DateRange>, DomainError> {
        self.read(session, SEARCH_RANGE_KEY).await
    }

    pub async fn put_summary(
        &self,
        session: &SessionId,
        summary: &ReservationSummary,
    ) -> Result<(), DomainError> {
        self.write(session, SUMMARY_KEY, summary).await
    }

    /// Read and remove the summary; it is shown once
    pub async fn take_summary(
        &self,
        session: &SessionId,
    ) -> Result<Option<ReservationSummary>, DomainError> {
        match self.sessions.remove(session, SUMMARY_KEY).await? {
            Some(value) => decode(SUMMARY_KEY, value).map(Some),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(
        &self,
        session: &SessionId,
        key: &str,
        value: &T,
    ) -> Result<(), DomainError> {
        let value = serde_json::to_value(value)
            .map_err(|e| DomainError::Internal(format!("Cannot encode session value {}: {}", key, e)))?;
        self.sessions.put(session, key, value).await
    }

    async fn read<T: DeserializeOwned>(
        &self,
        session: &SessionId,
        key: &str,
    ) -> Result<Option<T>, DomainError> {
        match self.sessions.get(session, key).await? {
            Some(value) => decode(key, value).map(Some),
            None => Ok(None),
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: serde_json::Value) -> Result<T, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::Internal(format!("Cannot decode session value {}: {}", key, e)))
}
