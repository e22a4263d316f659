use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{LetterData, ProgressState, SessionId};

/// Per-visitor state threaded through every storybook operation.
///
/// Sections start out absent and are created on first access, so a fresh
/// session serializes as an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter: Option<LetterData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress flags, created with every module incomplete if missing.
    pub fn progress_mut(&mut self) -> &mut ProgressState {
        self.progress.get_or_insert_with(ProgressState::default)
    }

    /// Letter data, created empty if missing.
    pub fn letter_mut(&mut self) -> &mut LetterData {
        self.letter.get_or_insert_with(LetterData::default)
    }
}

/// A stored session: identity, timestamps and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    id: SessionId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    pub state: SessionState,
}

impl SessionRecord {
    /// Start a brand-new session at `now`.
    #[must_use]
    pub fn new(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            state: SessionState::default(),
        }
    }

    /// Rehydrate a session from storage.
    #[must_use]
    pub fn from_persisted(
        id: SessionId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        state: SessionState,
    ) -> Self {
        Self {
            id,
            created_at,
            updated_at: updated_at.max(created_at),
            state,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record activity at `now`. Timestamps never move backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// True when the session has been idle since before `cutoff`.
    #[must_use]
    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.updated_at < cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModuleId;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn fresh_state_serializes_empty() {
        let json = serde_json::to_string(&SessionState::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn sections_are_created_on_first_access() {
        let mut state = SessionState::new();
        assert!(state.progress.is_none());
        state.progress_mut().complete(ModuleId::Elf);
        assert!(state.progress.is_some());

        assert!(!state.letter_mut().submitted);
        assert_eq!(state.letter, Some(LetterData::default()));
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = SessionState::new();
        state.progress_mut().complete(ModuleId::Reindeer);
        state.letter_mut().name = Some("Alex".into());
        state.reply = Some("Dear Alex,".into());

        let json = serde_json::to_string(&state).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn touch_only_moves_forward() {
        let now = fixed_now();
        let mut record = SessionRecord::new(SessionId::new(), now);
        record.touch(now - Duration::minutes(5));
        assert_eq!(record.updated_at(), now);

        record.touch(now + Duration::minutes(5));
        assert_eq!(record.updated_at(), now + Duration::minutes(5));
        assert_eq!(record.created_at(), now);
    }

    #[test]
    fn idle_check_uses_last_activity() {
        let now = fixed_now();
        let record = SessionRecord::new(SessionId::new(), now);
        assert!(record.is_idle_since(now + Duration::seconds(1)));
        assert!(!record.is_idle_since(now));
    }
}
