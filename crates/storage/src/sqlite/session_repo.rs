use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storybook_core::model::{SessionId, SessionRecord};

use crate::repository::{SessionRepository, StorageError};

use super::SqliteRepository;
use super::mapping::{encode_state, map_session_row};

fn conn(err: sqlx::Error) -> StorageError {
    StorageError::Connection(err.to_string())
}

#[async_trait]
impl SessionRepository for SqliteRepository {
    async fn get_session(&self, id: SessionId) -> Result<Option<SessionRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, state, created_at_ms, updated_at_ms
            FROM sessions
            WHERE id = ?1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_session_row).transpose()
    }

    async fn upsert_session(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let state = encode_state(&record.state)?;
        sqlx::query(
            r"
            INSERT INTO sessions (id, state, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                state = excluded.state,
                updated_at_ms = excluded.updated_at_ms
            ",
        )
        .bind(record.id().to_string())
        .bind(state)
        .bind(record.created_at().timestamp_millis())
        .bind(record.updated_at().timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn delete_session(&self, id: SessionId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_idle_sessions(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM sessions WHERE updated_at_ms < ?1")
            .bind(cutoff.timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(result.rows_affected())
    }
}
