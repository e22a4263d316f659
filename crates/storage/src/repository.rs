use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use storybook_core::model::{SessionId, SessionRecord};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for visitor sessions.
///
/// Writers replace the whole record; the last write for a session wins.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch a session by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails or the stored state cannot
    /// be decoded. A missing session is `Ok(None)`.
    async fn get_session(&self, id: SessionId) -> Result<Option<SessionRecord>, StorageError>;

    /// Persist or replace a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn upsert_session(&self, record: &SessionRecord) -> Result<(), StorageError>;

    /// Remove a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the session does not exist.
    async fn delete_session(&self, id: SessionId) -> Result<(), StorageError>;

    /// Remove every session whose last activity is before `cutoff`.
    ///
    /// Returns the number of sessions removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn delete_idle_sessions(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError>;
}

/// Simple in-memory repository for tests and single-process deployments.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of live sessions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn session_count(&self) -> Result<usize, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len())
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn get_session(&self, id: SessionId) -> Result<Option<SessionRecord>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn upsert_session(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.id(), record.clone());
        Ok(())
    }

    async fn delete_session(&self, id: SessionId) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&id).map(|_| ()).ok_or(StorageError::NotFound)
    }

    async fn delete_idle_sessions(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let before = guard.len();
        guard.retain(|_, record| !record.is_idle_since(cutoff));
        let removed = before - guard.len();
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let sessions: Arc<dyn SessionRepository> = Arc::new(InMemoryRepository::new());
        Self { sessions }
    }
}
