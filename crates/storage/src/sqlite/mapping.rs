use chrono::{DateTime, Utc};
use sqlx::Row;
use storybook_core::model::{SessionId, SessionRecord, SessionState};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn session_id_from_str(raw: &str) -> Result<SessionId, StorageError> {
    raw.parse().map_err(ser)
}

pub(crate) fn millis_to_datetime(
    field: &'static str,
    millis: i64,
) -> Result<DateTime<Utc>, StorageError> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| StorageError::Serialization(format!("{field} out of range")))
}

pub(crate) fn encode_state(state: &SessionState) -> Result<String, StorageError> {
    serde_json::to_string(state).map_err(ser)
}

pub(crate) fn map_session_row(row: &sqlx::sqlite::SqliteRow) -> Result<SessionRecord, StorageError> {
    let id = session_id_from_str(&row.try_get::<String, _>("id").map_err(ser)?)?;
    let state: SessionState =
        serde_json::from_str(&row.try_get::<String, _>("state").map_err(ser)?).map_err(ser)?;
    let created_at =
        millis_to_datetime("created_at_ms", row.try_get("created_at_ms").map_err(ser)?)?;
    let updated_at =
        millis_to_datetime("updated_at_ms", row.try_get("updated_at_ms").map_err(ser)?)?;

    Ok(SessionRecord::from_persisted(
        id, created_at, updated_at, state,
    ))
}
