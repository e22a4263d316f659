//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use storybook_core::model::{LetterError, ModuleId};

/// Errors emitted by `StoryService`.
///
/// Guard failures (`UnknownModule`, `ModuleLocked`, `FinaleLocked`) are
/// expected outcomes; callers usually send the visitor back to the map.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoryError {
    #[error("unknown module: {0}")]
    UnknownModule(String),
    #[error("module {0} is still locked")]
    ModuleLocked(ModuleId),
    #[error("finale is locked until every module is complete")]
    FinaleLocked,
    #[error(transparent)]
    Letter(#[from] LetterError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoryError {
    /// True for errors that only mean "not allowed here yet".
    #[must_use]
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            StoryError::UnknownModule(_) | StoryError::ModuleLocked(_) | StoryError::FinaleLocked
        )
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
