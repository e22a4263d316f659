use std::sync::Arc;

use chrono::Duration;
use storage::repository::{SessionRepository, Storage, StorageError};
use storybook_core::model::{
    Emotion, LetterError, LetterForm, ModuleId, SessionId, SessionRecord, SessionState,
};
use tracing::{debug, info, warn};

use super::view::{FinaleView, LetterView, MapView, ModuleView, ReplyView};
use crate::error::{AppServicesError, StoryError};
use crate::reply::{RandomChooser, ReplyGenerator};
use crate::{Clock, letter_service, progress_tracker};

/// Database URL selecting the in-process session store.
pub const IN_MEMORY_STORE: &str = "memory";

/// Where reply letters draw their random choices from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplySource {
    #[default]
    Thread,
    /// Every reply is written from a generator seeded with this value.
    Seeded(u64),
}

/// Orchestrates the storybook flow: guarded module access, completion,
/// finale, letters and replies, persisting the session after each step.
#[derive(Clone)]
pub struct StoryService {
    clock: Clock,
    sessions: Arc<dyn SessionRepository>,
    session_ttl: Duration,
    reply_source: ReplySource,
}

impl StoryService {
    #[must_use]
    pub fn new(clock: Clock, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            clock,
            sessions,
            session_ttl: Duration::hours(2),
            reply_source: ReplySource::Thread,
        }
    }

    /// Build a service over the store named by `database_url`.
    ///
    /// `memory` selects the in-process store; anything else is an `SQLite` URL.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the `SQLite` store cannot be opened.
    pub async fn connect(database_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = if database_url == IN_MEMORY_STORE {
            Storage::in_memory()
        } else {
            Storage::sqlite(database_url).await?
        };
        Ok(Self::new(clock, storage.sessions))
    }

    /// Sessions idle for longer than `ttl` are treated as gone.
    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_reply_source(mut self, source: ReplySource) -> Self {
        self.reply_source = source;
        self
    }

    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Resume the visitor's session, or start a fresh one when the id is
    /// missing, unknown or expired.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Storage` if the store fails.
    pub async fn open_session(&self, id: Option<SessionId>) -> Result<SessionRecord, StoryError> {
        if let Some(id) = id {
            if let Some(record) = self.sessions.get_session(id).await? {
                let cutoff = self.clock.expiry_cutoff(self.session_ttl);
                if !record.is_idle_since(cutoff) {
                    return Ok(record);
                }
                debug!(session = %id, "session expired");
                self.end_session(id).await?;
            }
        }

        let record = SessionRecord::new(SessionId::new(), self.clock.now());
        self.sessions.upsert_session(&record).await?;
        info!(session = %record.id(), "session started");
        Ok(record)
    }

    /// Drop a session entirely. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Storage` if the store fails.
    pub async fn end_session(&self, id: SessionId) -> Result<(), StoryError> {
        match self.sessions.delete_session(id).await {
            Ok(()) | Err(StorageError::NotFound) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Remove every session idle for longer than the TTL.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Storage` if the store fails.
    pub async fn expire_sessions(&self) -> Result<u64, StoryError> {
        let cutoff = self.clock.expiry_cutoff(self.session_ttl);
        let removed = self.sessions.delete_idle_sessions(cutoff).await?;
        if removed > 0 {
            info!(removed, "expired idle sessions");
        }
        Ok(removed)
    }

    /// # Errors
    ///
    /// Returns `StoryError::Storage` if the session cannot be saved.
    pub async fn map(&self, session: &mut SessionRecord) -> Result<MapView, StoryError> {
        let view = MapView::from_state(&mut session.state);
        self.save(session).await?;
        Ok(view)
    }

    /// Open a module page by short or full name.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::UnknownModule` or `StoryError::ModuleLocked` when
    /// the guard rejects the visit, `StoryError::Storage` on store failures.
    pub async fn enter_module(
        &self,
        session: &mut SessionRecord,
        key: &str,
    ) -> Result<ModuleView, StoryError> {
        let module = guard_module(&mut session.state, key)?;
        let view = ModuleView::from_state(&mut session.state, module);
        self.save(session).await?;
        Ok(view)
    }

    /// Mark a module complete. The module must be accessible.
    ///
    /// # Errors
    ///
    /// Same guards as [`StoryService::enter_module`].
    pub async fn complete_module(
        &self,
        session: &mut SessionRecord,
        key: &str,
    ) -> Result<ModuleView, StoryError> {
        let module = guard_module(&mut session.state, key)?;
        progress_tracker::mark_complete(&mut session.state, module.short_key());
        let view = ModuleView::from_state(&mut session.state, module);
        self.save(session).await?;
        info!(session = %session.id(), module = %module, progress = view.progress, "module completed");
        Ok(view)
    }

    /// # Errors
    ///
    /// Returns `StoryError::FinaleLocked` until every module is complete.
    pub async fn finale(&self, session: &mut SessionRecord) -> Result<FinaleView, StoryError> {
        if !progress_tracker::all_complete(&mut session.state) {
            warn!(session = %session.id(), "finale requested before all modules were completed");
            return Err(StoryError::FinaleLocked);
        }
        let view = FinaleView {
            progress: progress_tracker::get_progress(&mut session.state),
        };
        self.save(session).await?;
        Ok(view)
    }

    /// Clear module progress. The letter and reply are kept.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Storage` if the session cannot be saved.
    pub async fn reset(&self, session: &mut SessionRecord) -> Result<MapView, StoryError> {
        progress_tracker::reset(&mut session.state);
        let view = MapView::from_state(&mut session.state);
        self.save(session).await?;
        info!(session = %session.id(), "progress reset");
        Ok(view)
    }

    /// # Errors
    ///
    /// Returns `StoryError::Storage` if the session cannot be saved.
    pub async fn letter(&self, session: &mut SessionRecord) -> Result<LetterView, StoryError> {
        let view = LetterView::from_letter(letter_service::get_letter_data(&mut session.state));
        self.save(session).await?;
        Ok(view)
    }

    /// Validate and store the visitor's letter.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Letter` when required fields are blank (nothing is
    /// saved), `StoryError::Storage` on store failures.
    pub async fn submit_letter(
        &self,
        session: &mut SessionRecord,
        form: LetterForm,
    ) -> Result<LetterView, StoryError> {
        if let Err(err) = letter_service::save_letter_data(&mut session.state, form) {
            warn!(session = %session.id(), error = %err, "letter rejected");
            return Err(err.into());
        }
        let view = LetterView::from_letter(letter_service::get_letter_data(&mut session.state));
        self.save(session).await?;
        Ok(view)
    }

    /// Reply to the submitted letter, writing it on first request.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Letter` with `LetterError::NotSubmitted` before a
    /// letter exists, `StoryError::Storage` on store failures.
    pub async fn reply(&self, session: &mut SessionRecord) -> Result<ReplyView, StoryError> {
        let reply = self.write_reply(&mut session.state)?;
        let emotion = session
            .state
            .letter
            .as_ref()
            .and_then(|letter| letter.feeling())
            .map_or(Emotion::Generic, Emotion::detect);
        self.save(session).await?;
        Ok(ReplyView { reply, emotion })
    }

    fn write_reply(&self, state: &mut SessionState) -> Result<String, LetterError> {
        let reply = match self.reply_source {
            ReplySource::Thread => {
                let mut generator = ReplyGenerator::new(RandomChooser::thread());
                letter_service::santa_reply(state, &mut generator)?.to_owned()
            }
            ReplySource::Seeded(seed) => {
                let mut generator = ReplyGenerator::new(RandomChooser::seeded(seed));
                letter_service::santa_reply(state, &mut generator)?.to_owned()
            }
        };
        Ok(reply)
    }

    async fn save(&self, session: &mut SessionRecord) -> Result<(), StoryError> {
        session.touch(self.clock.now());
        self.sessions.upsert_session(session).await?;
        Ok(())
    }
}

fn guard_module(state: &mut SessionState, key: &str) -> Result<ModuleId, StoryError> {
    let Some(module) = ModuleId::resolve(key) else {
        warn!(key, "unknown module requested");
        return Err(StoryError::UnknownModule(key.to_owned()));
    };
    if !progress_tracker::is_accessible(state, module.short_key()) {
        warn!(module = %module, "locked module requested");
        return Err(StoryError::ModuleLocked(module));
    }
    Ok(module)
}
